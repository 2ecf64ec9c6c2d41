//! Queue behaviour tests through the public API.

use circular_queue::{DynamicQueue, Global, QueueError};
use std::{sync::Mutex, thread};

fn dequeue_all<T>(queue: &mut DynamicQueue<T>) -> Vec<T> {
    let mut values = Vec::with_capacity(queue.len());
    while let Ok(value) = queue.dequeue() {
        values.push(value);
    }
    values
}

#[test]
fn doubling_then_halving_scenario_works() {
    let mut queue = DynamicQueue::new(2);
    assert_eq!(queue.capacity(), 2);

    queue.enqueue("A");
    queue.enqueue("B");
    queue.enqueue("C");
    assert_eq!(queue.capacity(), 4);
    assert_eq!(queue.size(), 3);
    assert_eq!(queue.head(), Ok(&"A"));

    assert_eq!(queue.dequeue(), Ok("A"));
    assert_eq!(queue.size(), 2);

    assert_eq!(queue.dequeue(), Ok("B"));
    assert_eq!(queue.size(), 1);
    assert_eq!(queue.capacity(), 2);

    assert_eq!(queue.dequeue(), Ok("C"));
    assert_eq!(queue.size(), 0);
}

#[test]
fn underflow_errors_propagate_with_question_mark() {
    fn dequeue_pair(queue: &mut DynamicQueue<u8>) -> circular_queue::Result<(u8, u8)> {
        let first = queue.dequeue()?;
        let second = queue.dequeue()?;
        Ok((first, second))
    }

    let mut queue = DynamicQueue::new(4);
    queue.enqueue(1);
    assert_eq!(dequeue_pair(&mut queue), Err(QueueError::Underflow));

    queue.enqueue(2);
    queue.enqueue(3);
    assert_eq!(dequeue_pair(&mut queue), Ok((2, 3)));
}

#[test]
fn queue_with_explicit_allocator_behaves_like_default_one() {
    let mut queue = DynamicQueue::new_in(Global, 1);
    queue.extend(1..=9);

    assert_eq!(queue.capacity(), 16);
    assert_eq!(queue.to_string(), "[1, 2, 3, 4, 5, 6, 7, 8, 9]");
}

#[test]
fn cleared_queue_returns_to_construction_floor() {
    let mut queue = DynamicQueue::new(3);
    queue.extend(0..1000);
    assert!(queue.capacity() >= 1000);

    queue.clear();

    assert_eq!(queue.size(), 0);
    assert_eq!(queue.capacity(), 3);
    assert_eq!(queue.head(), Err(QueueError::Underflow));
}

#[test]
fn clone_is_independent_of_original() {
    let mut original = DynamicQueue::new(2);
    original.extend([1, 2, 3, 4, 5]);
    original.dequeue().unwrap();
    original.dequeue().unwrap();

    let mut copy = original.clone();
    assert_eq!(copy.size(), original.size());
    assert_eq!(copy.capacity(), original.capacity());

    copy.clear();
    copy.enqueue(42);

    assert_eq!(dequeue_all(&mut original), vec![3, 4, 5]);
    assert_eq!(dequeue_all(&mut copy), vec![42]);
}

#[test]
fn swapping_exchanges_observable_state() {
    let mut small = DynamicQueue::new(1);
    small.enqueue('x');
    let mut large = DynamicQueue::new(32);
    large.extend("abc".chars());

    small.swap(&mut large);

    assert_eq!((small.size(), small.capacity(), small.head()), (3, 32, Ok(&'a')));
    assert_eq!((large.size(), large.capacity(), large.head()), (1, 1, Ok(&'x')));
}

#[test]
fn queue_shared_behind_mutex_keeps_all_values() {
    let queue = Mutex::new(DynamicQueue::new(1));

    thread::scope(|scope| {
        for worker in 0..4 {
            let queue = &queue;
            scope.spawn(move || {
                for value in 0..100 {
                    queue.lock().unwrap().enqueue(worker * 100 + value);
                }
            });
        }
    });

    let mut queue = queue.into_inner().unwrap();
    assert_eq!(queue.size(), 400);

    let mut values = dequeue_all(&mut queue);
    values.sort_unstable();
    assert_eq!(values, (0..400).collect::<Vec<_>>());
    assert_eq!(queue.capacity(), 1);
}
