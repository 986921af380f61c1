//! Browser Timer
//!
//! `Timer` on top of `setTimeout`.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use todo_core::Timer;

#[derive(Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback).forget();
    }
}
