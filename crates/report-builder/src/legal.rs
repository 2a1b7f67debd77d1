//! Legal-basis lookup for the closed violation taxonomy.

use shared_types::ViolationType;

/// Fallback citation for `Other` and anything the taxonomy does not name.
pub const GENERIC_CITATION: &str = "Act on Fair Labeling and Advertising, Article 3";

/// The fixed citation attached to each violation type.
pub fn citation_for(kind: ViolationType) -> &'static str {
    match kind {
        ViolationType::UndisclosedMaterialConnection => {
            "Act on Fair Labeling and Advertising, Article 3(1)1 (false or exaggerated \
             labeling/advertising) and the Guidelines on Labeling and Advertising of \
             Endorsements"
        }
        ViolationType::DisclosurePositionInadequate => {
            "Guidelines on Labeling and Advertising of Endorsements, Article 7 (standards \
             for indicating economic interests)"
        }
        ViolationType::FalseOrExaggerated => {
            "Act on Fair Labeling and Advertising, Article 3(1)1 (false or exaggerated \
             labeling/advertising)"
        }
        ViolationType::Deceptive => {
            "Act on Fair Labeling and Advertising, Article 3(1)2 (deceptive \
             labeling/advertising)"
        }
        ViolationType::UnfairComparison => {
            "Act on Fair Labeling and Advertising, Article 3(1)3 (unfairly comparative \
             labeling/advertising)"
        }
        ViolationType::Other => GENERIC_CITATION,
    }
}
