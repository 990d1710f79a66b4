pub mod command;
pub mod output;
pub mod progress;
pub mod run;
