use leptos::ev::Event;
use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use crate::components::sankey::{SankeyCanvas, SankeyConfig, compute_layout, render_svg};
use crate::data::{oem_options, sample_supply_chain};
use crate::download::{download_csv, download_svg};
use crate::flow::{
	FilterSelection, FlowGraph, MATERIAL_CATEGORIES, compute_kpis, filter_flows_with_summary,
	format_magnitude, insight_summary,
};

const CANVAS_WIDTH: f64 = 960.0;
const CANVAS_HEIGHT: f64 = 540.0;
const CSV_FILENAME: &str = "supply_chain_flows.csv";
const SVG_FILENAME: &str = "supply_chain_flows.svg";

/// Supply-chain flow dashboard
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{sample_supply_chain().map(|graph| view! { <Dashboard graph=graph /> })}
		</ErrorBoundary>
	}
}

#[component]
fn Dashboard(graph: FlowGraph) -> impl IntoView {
	let oems = oem_options(&graph);
	info!("loaded {} nodes, {} links", graph.nodes.len(), graph.links.len());

	let (selection, set_selection) = signal(FilterSelection::default());
	let outcome = Memo::new(move |_| selection.with(|s| filter_flows_with_summary(&graph, s)));
	let filtered = Memo::new(move |_| outcome.with(|o| o.graph.clone()));
	let kpis = Memo::new(move |_| filtered.with(compute_kpis));

	let material_boxes = MATERIAL_CATEGORIES
		.iter()
		.map(|category| {
			let label = category.label();
			view! {
				<label class="chip">
					<input
						type="checkbox"
						prop:checked=move || selection.with(|s| s.has_material(label))
						on:change=move |_| set_selection.update(|s| s.toggle_material(label))
					/>
					{label}
				</label>
			}
		})
		.collect_view();

	let oem_boxes = oems
		.into_iter()
		.map(|oem| {
			let (checked_name, toggle_name) = (oem.clone(), oem.clone());
			view! {
				<label class="chip">
					<input
						type="checkbox"
						prop:checked=move || selection.with(|s| s.has_oem(&checked_name))
						on:change=move |_| set_selection.update(|s| s.toggle_oem(&toggle_name))
					/>
					{oem}
				</label>
			}
		})
		.collect_view();

	let on_threshold = move |ev: Event| {
		if let Ok(percent) = event_target_value(&ev).parse::<f64>() {
			set_selection.update(|s| s.min_link_percent = percent);
		}
	};

	let export_csv = move |_: MouseEvent| {
		let links = filtered.with_untracked(|g| g.links.clone());
		match download_csv(&links, CSV_FILENAME) {
			Ok(()) => info!("exported {} links to {}", links.len(), CSV_FILENAME),
			Err(e) => warn!("CSV export failed: {}", e),
		}
	};

	let export_svg = move |_: MouseEvent| {
		let markup = filtered.with_untracked(|g| {
			render_svg(&compute_layout(g, &SankeyConfig::default(), CANVAS_WIDTH, CANVAS_HEIGHT))
		});
		match download_svg(&markup, SVG_FILENAME) {
			Ok(()) => info!("exported diagram to {}", SVG_FILENAME),
			Err(e) => warn!("SVG export failed: {}", e),
		}
	};

	view! {
		<div class="dashboard">
			<header>
				<h1>"EV Battery Supply Chain"</h1>
				<p class="subtitle">"Material flows from refiners to cell makers and OEMs. Hover a node or band to trace it."</p>
			</header>

			<section class="filters">
				<fieldset>
					<legend>"Materials"</legend>
					{material_boxes}
				</fieldset>
				<fieldset>
					<legend>"OEMs"</legend>
					{oem_boxes}
				</fieldset>
				<fieldset>
					<legend>"Minimum flow"</legend>
					<input
						type="range"
						min="0"
						max="20"
						step="0.5"
						prop:value=move || selection.with(|s| s.min_link_percent.to_string())
						on:input=on_threshold
					/>
					<span class="threshold">
						{move || format!("{}% of total", selection.with(|s| s.min_link_percent))}
					</span>
				</fieldset>
			</section>

			<section class="kpis">
				<div class="kpi">
					<span class="kpi-label">"Total volume"</span>
					<span class="kpi-value">
						{move || kpis.with(|k| format_magnitude(k.total_volume, 1))}
					</span>
				</div>
				<div class="kpi">
					<span class="kpi-label">"Downstream entities"</span>
					<span class="kpi-value">{move || kpis.with(|k| k.num_downstream_entities)}</span>
				</div>
				<div class="kpi">
					<span class="kpi-label">"Top material"</span>
					<span class="kpi-value">{move || kpis.with(|k| k.top_category_label())}</span>
				</div>
				<div class="kpi">
					<span class="kpi-label">"Collapsed into Other"</span>
					<span class="kpi-value">
						{move || outcome.with(|o| format_magnitude(o.other_value, 1))}
					</span>
				</div>
			</section>

			<section class="insight">
				<p>{move || kpis.with(insight_summary)}</p>
				<p class="timestamp">"Updated " {move || kpis.with(|k| k.computed_at_iso())}</p>
			</section>

			<section class="diagram">
				<SankeyCanvas data=filtered width=CANVAS_WIDTH height=CANVAS_HEIGHT />
			</section>

			<section class="exports">
				<button on:click=export_csv>"Export CSV"</button>
				<button on:click=export_svg>"Export SVG"</button>
			</section>
		</div>
	}
}
