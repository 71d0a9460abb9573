pub mod goal_queue;
pub mod messages;
pub mod network;
pub mod refresher;
pub mod screen;
