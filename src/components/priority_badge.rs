use leptos::prelude::*;

use crate::commands::Priority;

#[component]
pub fn PriorityBadge(priority: Priority) -> impl IntoView {
    let class = match priority {
        Priority::High => "priority-badge priority-high",
        Priority::Medium => "priority-badge priority-medium",
        Priority::Low => "priority-badge priority-low",
    };
    view! { <span class=class>{priority.label()}</span> }
}
