pub mod name_controller;
pub mod page_controller;
pub mod system_controller;
