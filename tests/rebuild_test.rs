//! Tests for last-write-wins rebuild coordination

use std::sync::Arc;
use std::thread;

use alchetree::application::digest::sequence_digest;
use alchetree::application::services::RebuildCoordinator;

#[test]
fn given_fresh_coordinator_when_beginning_then_serials_increase() {
    // Arrange
    let coordinator: RebuildCoordinator<&str> = RebuildCoordinator::new();

    // Act
    let first = coordinator.begin("aaaa0000").expect("first ticket");
    let second = coordinator.begin("bbbb1111").expect("second ticket");

    // Assert
    assert!(second.serial() > first.serial());
    assert_eq!(first.digest(), "aaaa0000");
}

#[test]
fn given_newer_install_when_stale_build_finishes_then_rejected() {
    // Arrange
    let coordinator = RebuildCoordinator::new();
    let stale = coordinator.begin("aaaa0000").unwrap();
    let fresh = coordinator.begin("bbbb1111").unwrap();

    // Act: the newer build lands first
    assert!(coordinator.install(fresh, "fresh result"));
    let accepted = coordinator.install(stale, "stale result");

    // Assert
    assert!(!accepted);
    assert_eq!(coordinator.current(), Some("fresh result"));
    assert_eq!(coordinator.current_digest().as_deref(), Some("bbbb1111"));
}

#[test]
fn given_installed_digest_when_beginning_same_input_then_skips() {
    // Arrange
    let coordinator = RebuildCoordinator::new();
    let ticket = coordinator.begin("aaaa0000").unwrap();
    assert!(coordinator.install(ticket, 1));

    // Act & Assert: identical input needs no rebuild, new input does
    assert!(coordinator.begin("aaaa0000").is_none());
    assert!(coordinator.begin("bbbb1111").is_some());
}

#[test]
fn given_inflight_build_when_resubmitting_installed_input_then_rebuilds() {
    // Arrange: input A installed, a build for input B claimed but not landed
    let coordinator = RebuildCoordinator::new();
    let first = coordinator.begin("aaaa0000").unwrap();
    assert!(coordinator.install(first, "plan a"));
    let inflight = coordinator.begin("bbbb1111").unwrap();

    // Act: A comes back while B is still in flight
    let resubmit = coordinator.begin("aaaa0000");

    // Assert: the resubmission gets a fresh ticket that outranks the
    // in-flight build, so the most recent input ends up installed
    let ticket = resubmit.expect("fresh ticket for the resubmitted input");
    assert!(ticket.serial() > inflight.serial());
    assert!(coordinator.install(ticket, "plan a again"));
    assert!(!coordinator.install(inflight, "plan b"));
    assert_eq!(coordinator.current(), Some("plan a again"));
    assert_eq!(coordinator.current_digest().as_deref(), Some("aaaa0000"));
}

#[test]
fn given_changed_input_when_installing_then_replaces_value() {
    // Arrange
    let coordinator = RebuildCoordinator::new();
    let first = coordinator.begin("aaaa0000").unwrap();
    assert!(coordinator.install(first, "one"));

    // Act
    let second = coordinator.begin("bbbb1111").unwrap();
    assert!(coordinator.install(second, "two"));

    // Assert
    assert_eq!(coordinator.current(), Some("two"));
    assert_eq!(coordinator.current_digest().as_deref(), Some("bbbb1111"));
}

#[test]
fn given_concurrent_installs_when_racing_then_newest_ticket_wins() {
    // Arrange: tickets issued in order, installs raced across threads
    let coordinator = Arc::new(RebuildCoordinator::new());
    let older = coordinator.begin("aaaa0000").unwrap();
    let newer = coordinator.begin("bbbb1111").unwrap();

    // Act
    let c1 = Arc::clone(&coordinator);
    let c2 = Arc::clone(&coordinator);
    let h1 = thread::spawn(move || c1.install(older, "older"));
    let h2 = thread::spawn(move || c2.install(newer, "newer"));
    h1.join().unwrap();
    h2.join().unwrap();

    // Assert: whichever interleaving ran, the newest ticket's value stands
    assert_eq!(coordinator.current(), Some("newer"));
    assert_eq!(coordinator.current_digest().as_deref(), Some("bbbb1111"));
}

#[test]
fn given_step_lines_when_digesting_then_resubmission_detected() {
    // Arrange
    let lines = ["air + air = pressure", "earth + pressure = stone"];
    let coordinator = RebuildCoordinator::new();

    let ticket = coordinator.begin(&sequence_digest(lines)).unwrap();
    assert!(coordinator.install(ticket, "plan"));

    // Act & Assert: the same lines digest identically and skip the rebuild
    assert!(coordinator.begin(&sequence_digest(lines)).is_none());

    // A sequence differing only in line boundaries is a different input
    let shifted = ["air + air = pressureearth + pressure = stone"];
    assert!(coordinator.begin(&sequence_digest(shifted)).is_some());
}
