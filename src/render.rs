//! Terminal rendering of a caption.

use std::fmt::Write;

use crate::models::{Attribute, Caption};

fn attribute_line(attr: &Attribute) -> String {
    format!(
        "{}: {} (Confidence: {:.2})",
        attr.name,
        attr.value,
        attr.confidence_score()
    )
}

/// Human-readable report: details, attributes, user needs, cross-sell suggestions.
pub fn render_caption(caption: &Caption) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Product Details ==");
    let _ = writeln!(out, "Product Name: {}", caption.product_name);
    let _ = writeln!(out, "Description: {}", caption.description);

    let _ = writeln!(out, "\n== Attributes ==");
    for attr in &caption.attributes {
        let _ = writeln!(out, "- {}", attribute_line(attr));
    }

    let _ = writeln!(out, "\n== User Needs ==");
    for need in &caption.user_needs {
        let _ = writeln!(out, "- {}", need);
    }

    let _ = writeln!(out, "\n== Cross-sell Suggestions ==");
    for product in &caption.cross_sell_products {
        let _ = writeln!(out, "\n[{} - {}]", product.category, product.product_name);
        let _ = writeln!(out, "  Search Query: {}", product.search_query);
        let _ = writeln!(out, "  Description: {}", product.description);
        let _ = writeln!(out, "  Attributes:");
        for attr in &product.attributes {
            let _ = writeln!(out, "    - {}", attribute_line(attr));
        }
    }

    out
}

/// Pretty JSON of the caption document, as shown in the raw view and export.
pub fn caption_json(caption: &Caption) -> String {
    serde_json::to_string_pretty(caption).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrossSellProduct;
    use serde_json::Number;

    fn score(value: f64) -> Number {
        Number::from_f64(value).unwrap()
    }

    fn caption() -> Caption {
        Caption {
            product_name: "Leather Tote".to_string(),
            description: "Tan leather tote with brass fittings.".to_string(),
            attributes: vec![Attribute {
                name: "Material".to_string(),
                value: "Leather".to_string(),
                confidence: score(0.65),
            }],
            user_needs: vec!["office commute".to_string()],
            cross_sell_products: vec![CrossSellProduct {
                category: "Accessories".to_string(),
                product_name: "Leather Card Holder".to_string(),
                search_query: "tan leather card holder".to_string(),
                description: "Slim card holder in vegetable-tanned leather.".to_string(),
                attributes: vec![Attribute {
                    name: "Color".to_string(),
                    value: "Tan".to_string(),
                    confidence: score(0.8),
                }],
            }],
        }
    }

    #[test]
    fn report_lists_every_section() {
        let text = render_caption(&caption());
        assert!(text.contains("Product Name: Leather Tote"));
        assert!(text.contains("- Material: Leather (Confidence: 0.65)"));
        assert!(text.contains("- office commute"));
        assert!(text.contains("[Accessories - Leather Card Holder]"));
        assert!(text.contains("Search Query: tan leather card holder"));
        assert!(text.contains("    - Color: Tan (Confidence: 0.80)"));
    }

    #[test]
    fn integer_confidence_renders_with_two_decimals() {
        let mut caption = caption();
        caption.attributes[0].confidence = Number::from(0);
        assert!(render_caption(&caption).contains("- Material: Leather (Confidence: 0.00)"));
    }

    #[test]
    fn json_view_matches_document() {
        let caption = caption();
        let parsed: serde_json::Value = serde_json::from_str(&caption_json(&caption)).unwrap();
        assert_eq!(parsed, caption.to_document());
    }
}
