use leptos::prelude::*;

use crate::checklist::{ChecklistState, ItemKey, SectionExpansion};
use crate::commands::{AuditSection, ChecklistItem, Status};
use crate::components::priority_badge::PriorityBadge;
use crate::components::score_circle::ScoreCircle;

/// One collapsible audit section with its checklist.
#[component]
pub fn SectionCard(
    section: AuditSection,
    checklist: RwSignal<ChecklistState>,
    expansion: RwSignal<SectionExpansion>,
) -> impl IntoView {
    let status_class = match section.status {
        Status::Good => "section-status status-good",
        Status::Warning => "section-status status-warning",
        Status::Critical => "section-status status-critical",
    };

    let id = section.id.clone();
    let expanded = Memo::new(move |_| expansion.with(|e| e.is_expanded(&id)));

    let id = section.id.clone();
    let toggle_section = move |_| expansion.update(|e| e.toggle(&id));

    let counted = section.clone();
    let done_label = move || {
        let done = checklist.with(|c| c.completed_in(&counted));
        format!("{} / {} erledigt", done, counted.checklist.len())
    };

    let findings = section.findings.clone();
    let items = section
        .checklist
        .iter()
        .enumerate()
        .map(|(index, item)| {
            view! {
                <ChecklistRow
                    item_key=ItemKey::new(section.id.as_str(), index)
                    item=item.clone()
                    checklist=checklist
                />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="card section-card">
            <div class="section-header" on:click=toggle_section>
                <div class="section-heading">
                    <ScoreCircle score=section.score />
                    <div>
                        <h3>{section.title.clone()}</h3>
                        <div class="section-meta">
                            <span class=status_class>{format!("Status: {}", section.status.label())}</span>
                            <span class="meta-separator">"\u{2022}"</span>
                            <span class="section-done">{done_label}</span>
                        </div>
                    </div>
                </div>
                <span class="chevron">{move || if expanded.get() { "\u{25B2}" } else { "\u{25BC}" }}</span>
            </div>

            <div class="section-body" style:display=move || if expanded.get() { "block" } else { "none" }>
                <div class="findings-box">
                    <strong>"Analyse Ergebnis:"</strong>
                    <p>{findings}</p>
                </div>
                <div class="checklist">{items}</div>
            </div>
        </div>
    }
}

#[component]
fn ChecklistRow(item_key: ItemKey, item: ChecklistItem, checklist: RwSignal<ChecklistState>) -> impl IntoView {
    let check_key = item_key.clone();
    let checked = Memo::new(move |_| checklist.with(|c| c.is_checked(&check_key)));

    view! {
        <div
            class=move || if checked.get() { "checklist-item checked" } else { "checklist-item" }
            on:click=move |_| checklist.update(|c| c.toggle(item_key.clone()))
        >
            <span class="check-circle">{move || if checked.get() { "\u{2713}" } else { "" }}</span>
            <div class="checklist-content">
                <div class="checklist-title-row">
                    <h4 class="task-title">{item.task.clone()}</h4>
                    <PriorityBadge priority=item.priority />
                </div>
                <p class="task-description">{item.description.clone()}</p>
                <span class="task-difficulty">{format!("Aufwand: {}", item.difficulty.label())}</span>
            </div>
        </div>
    }
}
