/// Window, period and frame timing for one request.
pub mod planner;
