//! Text renderings of a [`CarbonReport`].

use super::{gj, CarbonReport};
use crate::scenario::{Decision, ScenarioResult};

pub(super) fn markdown(report: &CarbonReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.title));
    output.push_str(&format!(
        "_Generated {} with the {} estimator_\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.variant
    ));

    // Cover
    output.push_str("## Recommendation\n\n");
    output.push_str(&format!("**{}**: {}\n\n", report.decision, report.recommended_scenario));
    output.push_str(&format!(
        "**{:.1}% Carbon Savings** ({:.1} GJ)\n\n",
        report.savings_percent,
        gj(report.savings)
    ));

    output.push_str("### Project Overview\n\n");
    output.push_str("| Item | Value |\n");
    output.push_str("|------|-------|\n");
    output.push_str(&format!("| Building Type | {} |\n", report.project.building_type));
    if let Some(program) = &report.project.program_after_renovation {
        output.push_str(&format!("| Program After Renovation | {} |\n", program));
    }
    output.push_str(&format!("| Floor Area | {} m² |\n", report.project.floor_area_m2));
    output.push_str(&format!("| Climate Zone | {} |\n", report.project.climate));
    output.push_str(&format!(
        "| Total Materials | {} t |\n",
        report.project.total_material_tonnes
    ));
    output.push('\n');

    output.push_str("### Optimal Scenarios\n\n");
    for (label, scenario) in [
        ("Best Renovation", &report.best_renovation),
        ("Best New Build", &report.best_newbuild),
    ] {
        output.push_str(&format!(
            "- **{}**: {} (Total: {:.1} GJ over {} years)\n",
            label,
            scenario.display_name,
            gj(scenario.total_carbon),
            scenario.lifespan_years
        ));
    }
    output.push('\n');

    // Input summary
    output.push_str("## Input Summary\n\n");
    output.push_str("| Parameter | Value |\n");
    output.push_str("|-----------|-------|\n");
    output.push_str(&format!(
        "| Climate Multiplier | {:.2} |\n",
        report.project.climate_factor
    ));
    output.push_str(&format!(
        "| Embodied Baseline | {:.0} MJ/m² |\n",
        report.inputs.embodied_base_mj_per_m2
    ));
    if report.inputs.material_add_on_mj_per_m2 > 0.0 {
        output.push_str(&format!(
            "| Material Add-on | {:.1} MJ/m² |\n",
            report.inputs.material_add_on_mj_per_m2
        ));
    }
    output.push_str(&format!(
        "| Operational Baseline | {:.0} kWh/m²/yr |\n",
        report.inputs.operational_baseline_kwh_per_m2
    ));
    if let Some(context) = report.inputs.operational_context_kwh_per_m2 {
        output.push_str(&format!(
            "| Declared Operational Context | ~{:.0} kWh/m²/yr |\n",
            context
        ));
    }
    output.push_str(&format!(
        "| Program Factor | {:.2} |\n",
        report.inputs.program_factor
    ));
    output.push_str(&format!(
        "| Material Factor | {:.2} |\n",
        report.inputs.material_factor
    ));
    if let Some(rate) = report.inputs.reuse_rate {
        output.push_str(&format!("| Reuse Rate | {:.0}% |\n", rate * 100.0));
    }
    if let Some(years) = report.inputs.design_lifespan_years {
        output.push_str(&format!("| Design Lifespan | {} years |\n", years));
    }
    output.push('\n');

    if !report.inputs.materials.is_empty() {
        output.push_str("### Materials\n\n");
        output.push_str("| Material | Quantity (t) | Factor | kgCO2e/t |\n");
        output.push_str("|----------|--------------|--------|----------|\n");
        for line in &report.inputs.materials {
            output.push_str(&format!(
                "| {} | {} | {:.2} | {:.0} |\n",
                line.material, line.quantity_tonnes, line.factor, line.embodied_carbon
            ));
        }
        output.push('\n');
    }

    // Results
    output.push_str("## Results\n\n");
    output.push_str("### Top Scenarios\n\n");
    push_scenario_table(&mut output, &report.top_scenarios, None);

    output.push_str("### Key Insights\n\n");
    for insight in &report.insights {
        output.push_str(&format!("- {}\n", insight));
    }
    output.push('\n');

    // Full comparison
    output.push_str("## Scenario Comparison\n\n");
    push_scenario_table(
        &mut output,
        &report.all_scenarios,
        Some(recommended_key(report)),
    );

    output.push_str("### Renovation vs New Build\n\n");
    output.push_str(&format!(
        "- Average Renovation: {:.1} GJ\n",
        report.comparison.average_renovation / 1000.0
    ));
    output.push_str(&format!(
        "- Average New Build: {:.1} GJ\n",
        report.comparison.average_newbuild / 1000.0
    ));
    output.push_str(&format!(
        "- Difference: {:.1} GJ ({:.1}%)\n\n",
        report.comparison.difference / 1000.0,
        report.comparison.difference_percent
    ));

    // Methodology
    output.push_str("## Methodology\n\n");
    for item in &report.methodology {
        output.push_str(&format!("- {}\n", item));
    }
    output.push('\n');

    output.push_str("### Scenario Descriptions\n\n");
    for scenario in &report.scenario_descriptions {
        output.push_str(&format!("- **{}**: {}\n", scenario.name, scenario.description));
    }
    output.push('\n');

    output.push_str("### Limitations & Disclaimer\n\n");
    output.push_str(&report.disclaimer);
    output.push('\n');

    output
}

fn push_scenario_table(output: &mut String, scenarios: &[ScenarioResult], recommended: Option<&str>) {
    output.push_str("| Scenario | Category | Lifespan (yr) | Embodied (GJ) | Operational (GJ) | Total (GJ) |\n");
    output.push_str("|----------|----------|---------------|---------------|------------------|------------|\n");
    for scenario in scenarios {
        let marker = if recommended == Some(scenario.scenario_key.as_str()) {
            " (recommended)"
        } else {
            ""
        };
        output.push_str(&format!(
            "| {}{} | {} | {} | {:.1} | {:.1} | {:.1} |\n",
            scenario.display_name,
            marker,
            scenario.category.display_name(),
            scenario.lifespan_years,
            gj(scenario.embodied_carbon),
            gj(scenario.operational_carbon),
            gj(scenario.total_carbon)
        ));
    }
    output.push('\n');
}

pub(super) fn html(report: &CarbonReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n");
    html.push_str("<head>\n");
    html.push_str(&format!("  <title>{}</title>\n", escape(&report.title)));
    html.push_str("  <style>\n");
    html.push_str("    body { font-family: Arial, sans-serif; margin: 40px; }\n");
    html.push_str("    h1 { color: #047857; }\n");
    html.push_str("    h2 { color: #666; border-bottom: 1px solid #ddd; }\n");
    html.push_str(
        "    table { border-collapse: collapse; width: 100%; margin-bottom: 20px; }\n",
    );
    html.push_str("    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n");
    html.push_str("    th { background-color: #f2f2f2; }\n");
    html.push_str("    tr:nth-child(even) { background-color: #f9f9f9; }\n");
    html.push_str("    .decision { font-size: 1.6em; font-weight: bold; color: #047857; }\n");
    html.push_str("    .best { color: green; font-weight: bold; }\n");
    html.push_str("    .disclaimer { color: #666; font-size: 0.9em; }\n");
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");

    html.push_str(&format!("  <h1>{}</h1>\n", escape(&report.title)));
    html.push_str(&format!(
        "  <p>Generated {} with the {} estimator</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        escape(&report.variant.to_string())
    ));

    html.push_str("  <h2>Recommendation</h2>\n");
    html.push_str(&format!(
        "  <p class=\"decision\">{}: {}</p>\n",
        escape(report.decision.display_name()),
        escape(&report.recommended_scenario)
    ));
    html.push_str(&format!(
        "  <p>{:.1}% Carbon Savings ({:.1} GJ)</p>\n",
        report.savings_percent,
        gj(report.savings)
    ));

    html.push_str("  <h2>Project Overview</h2>\n");
    let mut overview = vec![
        ("Building Type", report.project.building_type.clone()),
        ("Floor Area", format!("{} m²", report.project.floor_area_m2)),
        ("Climate Zone", report.project.climate.clone()),
        (
            "Total Materials",
            format!(
                "{} t across {} types",
                report.project.total_material_tonnes, report.project.material_types
            ),
        ),
    ];
    if let Some(program) = &report.project.program_after_renovation {
        overview.insert(1, ("Program After Renovation", program.clone()));
    }
    push_html_rows(&mut html, &overview);

    html.push_str("  <h3>Optimal Scenarios</h3>\n");
    html.push_str("  <ul>\n");
    for (label, scenario) in [
        ("Best Renovation", &report.best_renovation),
        ("Best New Build", &report.best_newbuild),
    ] {
        html.push_str(&format!(
            "    <li><strong>{}</strong>: {} (Total: {:.1} GJ over {} years)</li>\n",
            label,
            escape(&scenario.display_name),
            gj(scenario.total_carbon),
            scenario.lifespan_years
        ));
    }
    html.push_str("  </ul>\n");

    html.push_str("  <h2>Input Summary</h2>\n");
    let mut parameters = vec![
        (
            "Climate Multiplier",
            format!("{:.2}", report.project.climate_factor),
        ),
        (
            "Embodied Baseline",
            format!("{:.0} MJ/m²", report.inputs.embodied_base_mj_per_m2),
        ),
    ];
    if report.inputs.material_add_on_mj_per_m2 > 0.0 {
        parameters.push((
            "Material Add-on",
            format!("{:.1} MJ/m²", report.inputs.material_add_on_mj_per_m2),
        ));
    }
    parameters.push((
        "Operational Baseline",
        format!("{:.0} kWh/m²/yr", report.inputs.operational_baseline_kwh_per_m2),
    ));
    if let Some(context) = report.inputs.operational_context_kwh_per_m2 {
        parameters.push((
            "Declared Operational Context",
            format!("~{:.0} kWh/m²/yr", context),
        ));
    }
    parameters.push(("Program Factor", format!("{:.2}", report.inputs.program_factor)));
    parameters.push(("Material Factor", format!("{:.2}", report.inputs.material_factor)));
    if let Some(rate) = report.inputs.reuse_rate {
        parameters.push(("Reuse Rate", format!("{:.0}%", rate * 100.0)));
    }
    if let Some(years) = report.inputs.design_lifespan_years {
        parameters.push(("Design Lifespan", format!("{} years", years)));
    }
    push_html_rows(&mut html, &parameters);

    if !report.inputs.materials.is_empty() {
        html.push_str("  <h3>Materials</h3>\n");
        html.push_str("  <table>\n");
        html.push_str("    <tr><th>Material</th><th>Quantity (t)</th><th>Factor</th><th>kgCO2e/t</th></tr>\n");
        for line in &report.inputs.materials {
            html.push_str(&format!(
                "    <tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.0}</td></tr>\n",
                escape(&line.material),
                line.quantity_tonnes,
                line.factor,
                line.embodied_carbon
            ));
        }
        html.push_str("  </table>\n");
    }

    html.push_str("  <h2>Results</h2>\n");
    html.push_str("  <h3>Top Scenarios</h3>\n");
    html.push_str("  <table>\n");
    html.push_str("    <tr><th>Scenario</th><th>Category</th><th>Lifespan (yr)</th><th>Embodied (GJ)</th><th>Operational (GJ)</th><th>Total (GJ)</th></tr>\n");
    for scenario in &report.top_scenarios {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            escape(&scenario.display_name),
            scenario.category.display_name(),
            scenario.lifespan_years,
            gj(scenario.embodied_carbon),
            gj(scenario.operational_carbon),
            gj(scenario.total_carbon)
        ));
    }
    html.push_str("  </table>\n");

    html.push_str("  <h3>Key Insights</h3>\n");
    html.push_str("  <ul>\n");
    for insight in &report.insights {
        html.push_str(&format!("    <li>{}</li>\n", escape(insight)));
    }
    html.push_str("  </ul>\n");

    html.push_str("  <h2>Scenario Comparison</h2>\n");
    html.push_str("  <table>\n");
    html.push_str("    <tr><th>Scenario</th><th>Category</th><th>Lifespan (yr)</th><th>Embodied (GJ)</th><th>Operational (GJ)</th><th>Total (GJ)</th></tr>\n");
    for row in &report.charts.comparison {
        let cell = |value: i64, best: bool| {
            if best {
                format!("<td class=\"best\">{:.1}</td>", gj(value))
            } else {
                format!("<td>{:.1}</td>", gj(value))
            }
        };
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td><td>{}</td>{}{}{}</tr>\n",
            escape(&row.label),
            row.category.display_name(),
            row.lifespan_years,
            cell(row.embodied, row.best_embodied),
            cell(row.operational, row.best_operational),
            cell(row.total, row.best_total)
        ));
    }
    html.push_str("  </table>\n");
    html.push_str(&format!(
        "  <p>Average renovation {:.1} GJ, average new build {:.1} GJ, difference {:.1}%.</p>\n",
        report.comparison.average_renovation / 1000.0,
        report.comparison.average_newbuild / 1000.0,
        report.comparison.difference_percent
    ));

    html.push_str("  <h2>Methodology</h2>\n");
    html.push_str("  <ul>\n");
    for item in &report.methodology {
        html.push_str(&format!("    <li>{}</li>\n", escape(item)));
    }
    html.push_str("  </ul>\n");
    html.push_str("  <ul>\n");
    for scenario in &report.scenario_descriptions {
        html.push_str(&format!(
            "    <li><strong>{}</strong>: {}</li>\n",
            escape(&scenario.name),
            escape(&scenario.description)
        ));
    }
    html.push_str("  </ul>\n");
    html.push_str(&format!(
        "  <p class=\"disclaimer\">{}</p>\n",
        escape(&report.disclaimer)
    ));

    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}

fn push_html_rows(html: &mut String, rows: &[(&str, String)]) {
    html.push_str("  <table>\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "    <tr><th>{}</th><td>{}</td></tr>\n",
            label,
            escape(value)
        ));
    }
    html.push_str("  </table>\n");
}

pub(super) fn csv(report: &CarbonReport) -> String {
    let mut csv = String::new();

    csv.push_str("Scenario,Display Name,Category,Lifespan,Reuse Rate,Embodied (MJ),Operational (MJ),Total (MJ),Recommended\n");

    let recommended = recommended_key(report);

    for scenario in &report.all_scenarios {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            scenario.scenario_key,
            quote(&scenario.display_name),
            scenario.category,
            scenario.lifespan_years,
            scenario.reuse_rate,
            scenario.embodied_carbon,
            scenario.operational_carbon,
            scenario.total_carbon,
            scenario.scenario_key == recommended
        ));
    }

    csv
}

fn recommended_key(report: &CarbonReport) -> &str {
    match report.decision {
        Decision::Renovate => &report.best_renovation.scenario_key,
        Decision::DemolishAndRebuild => &report.best_newbuild.scenario_key,
    }
}

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Hot & Dry <x>"), "Hot &amp; Dry &lt;x&gt;");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("Deep + Demo"), "Deep + Demo");
        assert_eq!(quote("a,b"), "\"a,b\"");
    }
}
