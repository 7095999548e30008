use std::{
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

use chrono::{DateTime, Local};

pub trait Clock: Send + 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Starts a background thread that samples `clock` every `period` and sends
/// the instant down the returned channel. The first sample is sent
/// immediately. The thread exits once the receiver is dropped.
pub fn spawn_ticker<C: Clock>(clock: C, period: Duration) -> Receiver<DateTime<Local>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        loop {
            if tx.send(clock.now()).is_err() {
                log::debug!("tick receiver dropped, stopping ticker");
                break;
            }
            thread::sleep(period);
        }
    });

    rx
}
