pub mod name_service;
