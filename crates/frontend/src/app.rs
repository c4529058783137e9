use crate::shared::tabs::{Panel, Tab, TabList};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="tabs-demo">
            <h1>"Tabs"</h1>
            <TabList>
                <Tab>"Overview"</Tab>
                <Panel>
                    <p>"Use the arrow keys, Home and End to move between tabs."</p>
                </Panel>
                <Tab selected=true>"Details"</Tab>
                <Panel>
                    <p>"This tab was selected in the markup, so it opens first."</p>
                </Panel>
                <Tab>"About"</Tab>
                <Panel>
                    <p>"Only the selected tab is reachable with the Tab key."</p>
                </Panel>
            </TabList>

            <DynamicTabs />
        </main>
    }
}

/// Tabs added at runtime; every addition fires a slot change and a relink.
#[component]
fn DynamicTabs() -> impl IntoView {
    let pages = RwSignal::new(vec![1usize]);

    let add_page = move |_| {
        pages.update(|p| {
            let next = p.last().copied().unwrap_or(0) + 1;
            p.push(next);
        });
    };

    view! {
        <section class="tabs-demo__dynamic">
            <h2>"Dynamic"</h2>
            <button type="button" on:click=add_page>"Add tab"</button>
            <TabList id="dynamic-tabs">
                <For
                    each=move || pages.get()
                    key=|n| *n
                    children=move |n| view! {
                        <Tab>{format!("Page {}", n)}</Tab>
                        <Panel>
                            <p>{format!("Content of page {}", n)}</p>
                        </Panel>
                    }
                />
            </TabList>
        </section>
    }
}
