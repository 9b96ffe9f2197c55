pub mod contact_handler;
