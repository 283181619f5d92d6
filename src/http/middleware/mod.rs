pub mod current_endpoint;
