//! Dedicated input-reading thread: blocks on `crossterm::event::read`
//! and pushes decoded events into a bounded, mutex-protected queue that
//! the frame loop drains once per tick. Escape-sequence and mouse
//! decoding is `crossterm`'s job, not this crate's.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossterm::event;

/// Oldest events are dropped once the queue is full, so a slow frame
/// loop degrades to losing old input rather than growing without bound.
const QUEUE_CAPACITY: usize = 256;

pub type EventQueue = Arc<Mutex<VecDeque<event::Event>>>;

pub fn spawn() -> EventQueue {
    let queue: EventQueue = Arc::new(Mutex::new(VecDeque::with_capacity(QUEUE_CAPACITY)));
    let producer = Arc::clone(&queue);
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                let mut q = producer.lock().unwrap();
                if q.len() >= QUEUE_CAPACITY {
                    q.pop_front();
                }
                q.push_back(ev);
            }
            Err(_) => break,
        }
    });
    queue
}
