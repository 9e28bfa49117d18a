pub mod process_handler;
