//! Every URL the app links or redirects to.

use uuid::Uuid;

pub const HOME: &str = "/";
pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const DASHBOARDS: &str = "/dashboards";
pub const ADD_DASHBOARD: &str = "/add_dashboard";
pub const STATIC: &str = "/static";

pub fn board(id: &Uuid) -> String {
    format!("/dashboard/{id}")
}

pub fn rename_board(id: &Uuid) -> String {
    format!("/update_dashboard/{id}")
}

pub fn delete_board(id: &Uuid) -> String {
    format!("/delete_dashboard/{id}")
}

pub fn add_todo(board_id: &Uuid) -> String {
    format!("/dashboard/{board_id}/add_todo")
}

pub fn edit_todo(board_id: &Uuid, todo_id: &Uuid) -> String {
    format!("/dashboard/{board_id}/edit_todo/{todo_id}")
}

pub fn delete_todo(board_id: &Uuid, todo_id: &Uuid) -> String {
    format!("/dashboard/{board_id}/delete_todo/{todo_id}")
}

pub fn complete_todo(board_id: &Uuid, todo_id: &Uuid) -> String {
    format!("/dashboard/{board_id}/complete_todo/{todo_id}")
}
