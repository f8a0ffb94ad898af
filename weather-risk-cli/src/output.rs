use std::fmt::Write;

use weather_risk_core::AssessmentResponse;

/// Plain-text rendering of an assessment: header, risk cards, drivers and
/// the methodology note.
pub fn render(response: &AssessmentResponse) -> String {
    let meta = &response.meta;
    let mut out = String::new();

    let window = if meta.start_date == meta.end_date {
        meta.start_date.to_string()
    } else {
        format!("{} → {}", meta.start_date, meta.end_date)
    };
    let _ = writeln!(out, "{}", meta.location_name);
    let _ = writeln!(
        out,
        "{window}  ({:.2}, {:.2})  units: {} / {}",
        meta.lat,
        meta.lon,
        meta.units.temp.label(),
        meta.units.wind.label()
    );

    let _ = writeln!(out, "\nRisks");
    for risk in &response.risks {
        let percent = format!("{:.0}%", risk.probability * 100.0);
        let _ = writeln!(
            out,
            "  {}  {:<20} {percent:>4}  [{}]",
            risk.category.icon(),
            risk.label,
            risk.confidence
        );
    }

    let _ = writeln!(out, "\nDrivers");
    for driver in &response.drivers {
        let _ = writeln!(out, "  {:<14} {:>7.1} {}", driver.name, driver.value, driver.unit);
    }

    let _ = writeln!(out, "\nMethodology & Data Sources");
    let _ = writeln!(out, "  {}", response.explanation);
    let _ = writeln!(out, "  ⚠️ {}", response.disclaimer);

    out
}
