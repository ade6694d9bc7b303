use std::thread;
use std::time::{Duration, Instant};

use vision_video::lock::OpenCloseLock;

#[test]
fn test_permit_released_on_drop() {
    let lock = OpenCloseLock::new();
    assert!(lock.is_available());
    let permit = lock.try_acquire_for(Duration::from_millis(10)).unwrap();
    assert!(permit.is_some());
    assert!(!lock.is_available());
    drop(permit);
    assert!(lock.is_available());
}

#[test]
fn test_times_out_while_held() {
    let lock = OpenCloseLock::new();
    let _permit = lock.acquire().unwrap();

    let started = Instant::now();
    assert!(lock.try_acquire_for(Duration::from_millis(30)).unwrap().is_none());
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn test_permit_dropped_on_another_thread() {
    let lock = OpenCloseLock::new();
    let permit = lock.acquire().unwrap();

    let releaser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        drop(permit);
    });

    assert!(lock.try_acquire_for(Duration::from_secs(5)).unwrap().is_some());
    releaser.join().unwrap();
}

#[test]
fn test_permit_released_when_holder_panics() {
    let lock = OpenCloseLock::new();
    let permit = lock.acquire().unwrap();

    let holder = thread::spawn(move || {
        let _permit = permit;
        panic!("holder failed");
    });
    assert!(holder.join().is_err());

    assert!(lock.is_available());
    assert!(lock.try_acquire_for(Duration::ZERO).unwrap().is_some());
}

#[test]
fn test_single_permit() {
    let lock = OpenCloseLock::new();
    let first = lock.try_acquire_for(Duration::ZERO).unwrap();
    assert!(first.is_some());
    assert!(lock.try_acquire_for(Duration::ZERO).unwrap().is_none());
    drop(first);
    assert!(lock.try_acquire_for(Duration::ZERO).unwrap().is_some());
}
