//! Prompt assembly
//!
//! All model-facing text lives here. The final-analysis prompt embeds the
//! enrichment outcome and *commands* the "Gene Identifier" status; the
//! model's compliance is trusted downstream, so the wording of these
//! commands is part of the pipeline contract.

use ntr_model::GeneRecord;

/// Checklist fields for the gene workflow, in required order.
/// "Gene Identifier" is always last.
pub const GENE_CHECK_FIELDS: [&str; 6] = [
    "Term Label",
    "Attribution (ORCID)",
    "Parent Term",
    "Definition",
    "Synonyms",
    "Gene Identifier",
];

/// Checklist fields for the simple workflow, in required order
pub const SIMPLE_CHECK_FIELDS: [&str; 5] = [
    "Term Label",
    "Attribution (ORCID)",
    "Parent Term",
    "Definition",
    "Synonyms",
];

const REPORT_STRUCTURE: &str = r#"{"summary": "...", "checks": [{"field": "...", "status": "...", "comment": "..."}], "recommendedAction": "...", "actionComment": "..."}"#;

/// Prompt for extracting a gene symbol and optional organism from a title
#[must_use]
pub fn extraction_prompt(title: &str) -> String {
    format!(
        "Your job is to extract a gene symbol and potentially a non-human animal \
         from a GitHub issue title. The title is: \"{title}\". \
         1. Look for a short, all-caps gene symbol (e.g., \"KIT\", \"STX17\"). \
         2. Look for a non-human animal. If found, provide its scientific name \
         (e.g., \"feline\" -> \"Felis catus\", \"canine\" -> \"Canis lupus familiaris\"). \
         If no non-human animal is mentioned, assume the context is human. \
         Return a JSON object like {{\"animal\": \"...\", \"geneSymbol\": \"...\"}}. \
         If the context is human, return {{\"animal\": null, \"geneSymbol\": \"...\"}}. \
         If no gene symbol can be found, return {{\"geneSymbol\": null}}. \
         Return ONLY the JSON object."
    )
}

/// Enrichment paragraph for the gene-workflow final prompt.
///
/// A found record embeds the verified facts and commands status OK; an
/// empty result commands status MISSING.
#[must_use]
pub fn gene_context(record: Option<&GeneRecord>) -> String {
    match record {
        Some(record) => format!(
            "A search for the gene in the title was performed. The following verified \
             information was found from {source}:\n\
             - Gene ID: {id}\n\
             - Full Gene Name: \"{name}\"\n\
             - Link: {link}\n\
             For the \"Gene Identifier\" check, the status MUST be \"OK\".",
            source = record.source,
            id = record.gene_id,
            name = record.gene_name,
            link = record.gene_link,
        ),
        None => "A search for the gene in the title was performed, but no matching ID was \
                 found from the relevant database (NCBI or HGNC). For the \"Gene Identifier\" \
                 check, the status MUST be \"MISSING\"."
            .to_string(),
    }
}

/// Final-analysis prompt for the gene workflow (six checklist fields)
#[must_use]
pub fn final_analysis_prompt(body: &str, record: Option<&GeneRecord>) -> String {
    let context = gene_context(record);
    let fields = quoted_field_list(&GENE_CHECK_FIELDS);
    format!(
        "You are an expert ontology curator. Analyze the following GitHub issue using \
         the information I provide.\n\
         {context}\n\
         The issue body is below:\n---\n{body}\n---\n\
         Return your analysis as a JSON object with the exact structure: {REPORT_STRUCTURE}.\n\
         The \"checks\" array MUST contain these six fields in this order: {fields}.\n\
         For EACH item in the \"checks\" array, the \"status\" value MUST be one of these \
         exact strings: \"OK\", \"MISSING\", \"INCOMPLETE\", \"INVALID_FORMAT\".\n\
         For the \"Gene Identifier\" comment, you MUST include the source (NCBI/HGNC), the \
         full gene name, and the link if they were found. If nothing was found, state that."
    )
}

/// Final-analysis prompt for the simple workflow (five checklist fields)
#[must_use]
pub fn simple_analysis_prompt(body: &str) -> String {
    let fields = quoted_field_list(&SIMPLE_CHECK_FIELDS);
    format!(
        "You are an expert ontology curator. Analyze the following GitHub issue.\n\
         The issue body is below:\n---\n{body}\n---\n\
         Return your analysis as a JSON object with the exact structure: {REPORT_STRUCTURE}.\n\
         The \"checks\" array MUST contain these five fields in this order: {fields}.\n\
         For each check, the \"status\" value MUST be one of these exact strings: \
         \"OK\", \"MISSING\", \"INCOMPLETE\", \"INVALID_FORMAT\"."
    )
}

fn quoted_field_list(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntr_model::GeneSource;

    fn kit_record() -> GeneRecord {
        GeneRecord::new(
            GeneSource::Ncbi,
            "493997",
            "KIT proto-oncogene, receptor tyrosine kinase",
            "https://www.ncbi.nlm.nih.gov/gene/493997",
        )
    }

    #[test]
    fn extraction_prompt_embeds_the_title() {
        let prompt = extraction_prompt("[NTR/gene] KIT in cats");
        assert!(prompt.contains("\"[NTR/gene] KIT in cats\""));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }

    #[test]
    fn found_record_commands_ok_status() {
        let context = gene_context(Some(&kit_record()));
        assert!(context.contains("found from NCBI"));
        assert!(context.contains("Gene ID: 493997"));
        assert!(context.contains("https://www.ncbi.nlm.nih.gov/gene/493997"));
        assert!(context.contains("the status MUST be \"OK\""));
    }

    #[test]
    fn empty_result_commands_missing_status() {
        let context = gene_context(None);
        assert!(context.contains("no matching ID was found"));
        assert!(context.contains("the status MUST be \"MISSING\""));
    }

    #[test]
    fn gene_prompt_lists_six_fields_with_gene_identifier_last() {
        let prompt = final_analysis_prompt("body text", Some(&kit_record()));
        assert!(prompt.contains("these six fields"));
        assert!(prompt.contains(
            "\"Term Label\", \"Attribution (ORCID)\", \"Parent Term\", \"Definition\", \
             \"Synonyms\", \"Gene Identifier\""
        ));
        assert!(prompt.contains("body text"));
    }

    #[test]
    fn simple_prompt_lists_five_fields_and_no_gene_context() {
        let prompt = simple_analysis_prompt("body text");
        assert!(prompt.contains("these five fields"));
        assert!(!prompt.contains("Gene Identifier"));
        assert!(!prompt.contains("search for the gene"));
    }
}
