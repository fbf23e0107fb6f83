pub mod container_list;
pub mod log_view;
pub mod status_bar;

pub use container_list::draw_container_list;
pub use log_view::draw_log_view;
pub use status_bar::draw_status_bar;
