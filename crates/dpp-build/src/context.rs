//! JSON-LD `@context` assembly for the emitted records.

/// Context shared by every passport regardless of sector.
pub const CORE_CONTEXT: &str = "https://w3id.org/dpp/context/core.jsonld";

/// Context URI for one sector extension.
pub fn sector_context(sector: &str) -> String {
    format!("https://w3id.org/dpp/context/{sector}.jsonld")
}

/// Core context first, then one context per active sector in
/// sector-addition order. Repeated sector ids collapse to one entry.
pub fn assemble_context(sectors: &[String]) -> Vec<String> {
    let mut context = vec![CORE_CONTEXT.to_string()];
    for sector in sectors {
        let uri = sector_context(sector);
        if !context.contains(&uri) {
            context.push(uri);
        }
    }
    context
}
