use serde_json::Value;

/// A detected analysis domain, inferred from which top-level key a worker's
/// raw payload carries. Order matters: `detect` checks in this order and
/// the first present key wins (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Geological,
    Economic,
    Curve,
    Risk,
    Market,
    Gis,
}

const ORDER: &[(Domain, &str)] = &[
    (Domain::Geological, "geological"),
    (Domain::Economic, "economic"),
    (Domain::Curve, "curve"),
    (Domain::Risk, "risk"),
    (Domain::Market, "market"),
    (Domain::Gis, "gis"),
];

/// Find the first domain-indicating top-level key present in `raw`, in the
/// fixed priority order. `None` if the payload carries none of them.
pub fn detect(raw: &Value) -> Option<Domain> {
    let obj = raw.as_object()?;
    ORDER
        .iter()
        .find(|(_, key)| obj.contains_key(*key))
        .map(|(domain, _)| *domain)
}
