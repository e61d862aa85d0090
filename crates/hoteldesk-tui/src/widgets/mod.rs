pub mod form;
pub mod sub_tabs;
