pub mod check_list;
pub mod controls;
pub mod radio_block;
