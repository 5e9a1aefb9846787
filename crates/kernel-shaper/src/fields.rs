use crate::domain::Domain;

/// Summary-field paths per domain (§4.4). Each path is resolved against the
/// raw payload and flattened so its last segment becomes the output key.
pub fn summary_paths(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Geological => &[
            "formationQuality.reservoirQuality",
            "formationQuality.hydrocarbonPotential",
            "investmentPerspective.recommendedAction",
            "investmentPerspective.geologicalConfidence",
            "professionalSummary",
        ],
        Domain::Economic => &[
            "economic.npv",
            "economic.irr",
            "investmentPerspective.recommendedAction",
            "professionalSummary",
        ],
        Domain::Curve => &["curve.eur.oil", "curve.qualityGrade", "professionalSummary"],
        Domain::Risk => &["risk.score", "professionalSummary"],
        Domain::Market => &["market.outlook", "professionalSummary"],
        Domain::Gis => &["gis.summary", "professionalSummary"],
    }
}
