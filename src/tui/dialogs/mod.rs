pub mod delete_confirmation;
pub mod help;
pub mod person_form;
