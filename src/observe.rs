// SPDX: CC0-1.0

//! Hooks run around every function evaluation.

use crate::Number;

pub trait Observer {
    /// Called with the function name and input before evaluating.
    fn before(&mut self, name: &str, x: Number);

    /// Called with the result after a successful evaluation.
    fn after(&mut self, y: Number);
}

/// Emits an `info` record for every call and result.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn before(&mut self, name: &str, x: Number) {
        log::info!("invoking `{name}` with x={x}");
    }

    fn after(&mut self, y: Number) {
        log::info!("result: {y}");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Observer for Silent {
    fn before(&mut self, _name: &str, _x: Number) {}

    fn after(&mut self, _y: Number) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Before { name: String, x: Number },
    After { y: Number },
}

/// Keeps every notification in order.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub events: Vec<Event>,
}

impl Observer for Recording {
    fn before(&mut self, name: &str, x: Number) {
        self.events.push(Event::Before {
            name: name.to_string(),
            x,
        });
    }

    fn after(&mut self, y: Number) {
        self.events.push(Event::After { y });
    }
}
