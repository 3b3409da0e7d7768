pub mod command_sender;
