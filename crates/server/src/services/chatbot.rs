//! Keyword chatbot.
//!
//! The shop's chat widget answers price questions by substring-matching the
//! incoming message against the catalog. Reply text stays bilingual
//! (Hindi + English) as on the rest of the customer surface.

use crate::db::{ProductRepository, RepositoryError};
use crate::models::Product;
use sqlx::PgPool;

const GREETINGS: [&str; 5] = ["hi", "hello", "नमस्ते", "हेलो", "हाय"];
const HELP_KEYWORDS: [&str; 2] = ["help", "मदद"];

/// Maximum matches listed when several products fit the query.
const MAX_LISTED_MATCHES: usize = 5;

/// Produce a chatbot reply for a raw user message.
///
/// # Errors
///
/// Returns `RepositoryError` if the product search fails.
pub async fn reply(pool: &PgPool, message: &str) -> Result<String, RepositoryError> {
    let normalized = message.trim().to_lowercase();

    if normalized.is_empty() {
        return Ok("कृपया कुछ टाइप करें (Please type something)".to_owned());
    }

    if let Some(scripted) = scripted_reply(&normalized) {
        return Ok(scripted.to_owned());
    }

    let products = ProductRepository::new(pool).search(&normalized).await?;
    Ok(product_reply(&normalized, &products))
}

/// Scripted replies for greetings and help requests.
fn scripted_reply(message: &str) -> Option<&'static str> {
    if GREETINGS.iter().any(|greet| message.contains(greet)) {
        return Some(
            "नमस्ते! 🙏 Kirana Store में आपका स्वागत है। आप किस सामान का दाम जानना चाहते हैं?",
        );
    }

    if HELP_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        return Some(
            "आप किसी भी सामान का नाम टाइप करें, मैं उसका दाम बताऊंगा। जैसे: \"चावल\", \"आटा\", \"तेल\" आदि।",
        );
    }

    None
}

/// Build a reply from the product search results.
fn product_reply(query: &str, products: &[Product]) -> String {
    match products {
        [] => format!(
            "❌ '{query}' उपलब्ध नहीं है (Not available)\n\nकृपया अन्य सामान खोजें या दुकान पर संपर्क करें।"
        ),
        [product] => format!(
            "✅ *{}*\n💰 कीमत: ₹{}\n📦 {}",
            product.name,
            product.price,
            if product.is_available {
                "उपलब्ध है (Available)"
            } else {
                "उपलब्ध नहीं (Unavailable)"
            }
        ),
        many => {
            let mut text = format!("मिलते-जुलते {} सामान मिले:\n\n", many.len());
            for product in many.iter().take(MAX_LISTED_MATCHES) {
                text.push_str(&format!("• {} - ₹{}\n", product.name, product.price));
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kirana_core::ProductId;
    use rust_decimal::Decimal;

    fn product(name: &str, price: i64, available: bool) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_owned(),
            price: Decimal::new(price, 0),
            image: "default.png".to_owned(),
            is_available: available,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_greeting_is_scripted() {
        assert!(scripted_reply("hello there").is_some());
        assert!(scripted_reply("हाय").is_some());
        assert!(scripted_reply("rice").is_none());
    }

    #[test]
    fn test_help_is_scripted() {
        let reply = scripted_reply("help me").expect("scripted");
        assert!(reply.contains("सामान का नाम"));
    }

    #[test]
    fn test_single_match_shows_price_card() {
        let products = [product("चावल (Rice) - 1kg", 60, true)];
        let reply = product_reply("चावल", &products);
        assert!(reply.contains("चावल (Rice) - 1kg"));
        assert!(reply.contains("₹60"));
        assert!(reply.contains("उपलब्ध है"));
    }

    #[test]
    fn test_unavailable_match_is_flagged() {
        let products = [product("चीनी (Sugar) - 1kg", 50, false)];
        let reply = product_reply("चीनी", &products);
        assert!(reply.contains("उपलब्ध नहीं"));
    }

    #[test]
    fn test_multiple_matches_list_top_five() {
        let products: Vec<Product> = (0..7)
            .map(|i| product(&format!("दाल {i}"), 100 + i, true))
            .collect();
        let reply = product_reply("दाल", &products);
        assert!(reply.contains("7 सामान मिले"));
        assert_eq!(reply.matches('•').count(), 5);
    }

    #[test]
    fn test_no_match_reports_unavailable() {
        let reply = product_reply("पिज्जा", &[]);
        assert!(reply.contains("'पिज्जा'"));
        assert!(reply.contains("Not available"));
    }
}
