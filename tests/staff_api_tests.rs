//! Integration tests for staff order management.
//!
//! Tests the authenticated GET/PUT order endpoints.

#[cfg(test)]
mod tests {
    /// Test order lookup returns 401 without the staff key.
    #[test]
    fn test_get_order_requires_staff_key() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Submit an order
        // 2. GET /api/living-order/{id} without X-Staff-Key
        // 3. Assert 401 Unauthorized
    }

    /// Test order lookup returns 404 for an unknown id.
    #[test]
    fn test_get_unknown_order_returns_404() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. GET /api/living-order/{random-uuid} with the staff key
        // 2. Assert 404 with body {"error": "Order not found"}
    }

    /// Test lookup through the wrong type endpoint returns 404.
    #[test]
    fn test_type_mismatch_returns_404() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Submit a memoriam order
        // 2. GET /api/living-order/{id} with the staff key
        // 3. Assert 404 Not Found
    }

    /// Test partial update leaves omitted fields untouched.
    #[test]
    fn test_patch_updates_only_named_fields() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Submit a living order
        // 2. PUT /api/living-order/{id} with only {"phone": "555-0100"}
        // 3. Assert 200 and verify name and email are unchanged while
        //    phone now matches
    }

    /// Test memoriam update accepts funeral home fields.
    #[test]
    fn test_patch_memoriam_funeral_fields() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Submit a memoriam order
        // 2. PUT /api/memoriam-order/{id} changing funeralHomeName
        //    and photographDisposition
        // 3. Assert 200 and verify the stored row reflects both
    }
}
