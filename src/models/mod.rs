/*
* Clockwise Models Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This is the root module for the time-tracking state machines.
* Both models are passive: the application drives them with one tick per second.
*/

pub mod stopwatch;
pub mod timer;

pub use stopwatch::{Stopwatch, StopwatchState};
pub use timer::{Timer, TimerState};
