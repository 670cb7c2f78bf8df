mod app;
mod checklist;
mod commands;
mod components;
mod pages;
mod session;
mod share;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
