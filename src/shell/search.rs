use crate::domain::Product;

/// Case-insensitive substring match on name or category.
///
/// A blank term yields the full list. Otherwise the term is matched as
/// typed, surrounding spaces included.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    if term.trim().is_empty() {
        return products.to_vec();
    }
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|product| product.matches(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 10.0,
            description: String::new(),
            category: category.to_string(),
            image_url: String::new(),
            in_stock: true,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![product(1, "Blue Shirt", "Apparel"), product(2, "Mug", "Home")]
    }

    #[test]
    fn matches_name_case_insensitively() {
        let hits = filter_products(&catalog(), "SHIRT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Blue Shirt");
    }

    #[test]
    fn matches_category() {
        let hits = filter_products(&catalog(), "home");
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn blank_term_returns_everything() {
        assert_eq!(filter_products(&catalog(), "   ").len(), 2);
        assert_eq!(filter_products(&catalog(), "").len(), 2);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        assert!(filter_products(&catalog(), " mug").is_empty());
        assert!(filter_products(&catalog(), "mug ").is_empty());

        let hits = filter_products(&catalog(), "blue shirt");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_products(&catalog(), "lamp").is_empty());
    }
}
