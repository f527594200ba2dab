#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_key() {
        let err = CoreError::NotFound {
            entity: "Tutorial",
            key: "amigurumi-bunny".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Entity not found: Tutorial with key amigurumi-bunny"
        );
    }
}
