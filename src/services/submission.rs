//! Order submission pipeline with compensating rollback.
//!
//! A submission persists three records sharing one server-generated
//! identifier: the base order, the type-specific detail row, and the medium
//! selection. The underlying store offers no multi-table transaction, so each
//! completed step pushes an undo action; when a later step fails the stack is
//! unwound in reverse order, restoring the pre-submission state before the
//! failure is reported. Attachment uploads are deliberately outside this
//! pipeline and never roll an order back.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::OrderStore;
use crate::error::{AppError, AppResult};
use crate::models::{OrderForm, OrderType};

/// Undo action for one completed pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UndoAction {
    DeleteBaseOrder(Uuid),
    DeleteDetail(Uuid, OrderType),
    DeleteMediums(Uuid),
}

/// Run the submission pipeline: validate, persist the three records, and on
/// any step failure unwind the completed steps before reporting the cause.
///
/// Not idempotent: an identical payload submitted twice creates two distinct
/// orders. Callers needing idempotence must deduplicate upstream.
pub async fn submit_order<S: OrderStore + ?Sized>(store: &S, form: &OrderForm) -> AppResult<Uuid> {
    form.validate()?;

    // Generated exactly once; the foreign key for every other record.
    let order_id = Uuid::now_v7();
    let mut undo: Vec<UndoAction> = Vec::new();

    match run_steps(store, order_id, form, &mut undo).await {
        Ok(()) => {
            info!(
                "Order submitted: id={}, type={}, mediums={}",
                order_id,
                form.order_type(),
                form.mediums().len()
            );
            Ok(order_id)
        }
        Err(err) => {
            error!(
                "Order submission failed ({} steps completed): {}",
                undo.len(),
                err
            );
            unwind(store, undo).await;
            Err(err)
        }
    }
}

async fn run_steps<S: OrderStore + ?Sized>(
    store: &S,
    order_id: Uuid,
    form: &OrderForm,
    undo: &mut Vec<UndoAction>,
) -> AppResult<()> {
    let order_type = form.order_type();

    // 1. Base order row; generates nothing to compensate if it fails.
    store.insert_base_order(order_id, order_type).await?;
    undo.push(UndoAction::DeleteBaseOrder(order_id));

    // 2. Type-specific detail row.
    store.insert_detail(order_id, form).await?;
    undo.push(UndoAction::DeleteDetail(order_id, order_type));

    // 3. Medium selection rows.
    store.insert_mediums(order_id, form.mediums()).await?;
    undo.push(UndoAction::DeleteMediums(order_id));

    Ok(())
}

/// Unwind completed steps in reverse order. Compensation failures are logged
/// and skipped; the pipeline still reports the original failure, and the
/// schema-level cascade from base_orders is the backstop for leftovers.
async fn unwind<S: OrderStore + ?Sized>(store: &S, undo: Vec<UndoAction>) {
    for action in undo.into_iter().rev() {
        let result = match &action {
            UndoAction::DeleteMediums(id) => store.delete_mediums(*id).await,
            UndoAction::DeleteDetail(id, order_type) => {
                store.delete_detail(*id, *order_type).await
            }
            UndoAction::DeleteBaseOrder(id) => store.delete_base_order(*id).await,
        };

        match result {
            Ok(()) => info!("Compensated submission step: {:?}", action),
            Err(e) => warn!("Compensation failed for {:?}: {}", action, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Disposition, LivingFormData, Medium, MemoriamFormData};
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    /// Which pipeline step the mock store should fail on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FailOn {
        Nothing,
        BaseOrder,
        Detail,
        Mediums,
    }

    /// Recording store: logs every call and fails on the configured step.
    struct MockStore {
        fail_on: FailOn,
        /// True when compensating deletes should also fail.
        fail_compensation: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockStore {
        fn new(fail_on: FailOn) -> Self {
            Self {
                fail_on,
                fail_compensation: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn db_error() -> AppError {
            AppError::Database("injected failure".to_string())
        }
    }

    #[async_trait]
    impl OrderStore for MockStore {
        async fn insert_base_order(&self, _id: Uuid, _order_type: OrderType) -> AppResult<()> {
            self.record("insert_base_order");
            if self.fail_on == FailOn::BaseOrder {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn delete_base_order(&self, _id: Uuid) -> AppResult<()> {
            self.record("delete_base_order");
            if self.fail_compensation {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn insert_detail(&self, _id: Uuid, _form: &OrderForm) -> AppResult<()> {
            self.record("insert_detail");
            if self.fail_on == FailOn::Detail {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn delete_detail(&self, _id: Uuid, _order_type: OrderType) -> AppResult<()> {
            self.record("delete_detail");
            if self.fail_compensation {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn insert_mediums(
            &self,
            _id: Uuid,
            _mediums: &BTreeSet<Medium>,
        ) -> AppResult<()> {
            self.record("insert_mediums");
            if self.fail_on == FailOn::Mediums {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn delete_mediums(&self, _id: Uuid) -> AppResult<()> {
            self.record("delete_mediums");
            if self.fail_compensation {
                return Err(Self::db_error());
            }
            Ok(())
        }

        async fn order_type(&self, _id: Uuid) -> AppResult<Option<OrderType>> {
            unimplemented!("not used by the pipeline")
        }

        async fn form_path(
            &self,
            _id: Uuid,
            _order_type: OrderType,
            _kind: crate::models::FormKind,
        ) -> AppResult<Option<String>> {
            unimplemented!("not used by the pipeline")
        }

        async fn set_form_path(
            &self,
            _id: Uuid,
            _order_type: OrderType,
            _kind: crate::models::FormKind,
            _path: Option<&str>,
        ) -> AppResult<()> {
            unimplemented!("not used by the pipeline")
        }
    }

    fn living_form() -> OrderForm {
        OrderForm::Living(LivingFormData {
            first_name: "Dana".to_string(),
            last_name: "Tinner".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            street_address: None,
            street_address2: None,
            city: None,
            state: None,
            postal_code: None,
            disposition: Disposition::AsIs,
            alteration_notes: None,
            inspiration_notes: None,
            mediums: BTreeSet::from([Medium::Ink]),
        })
    }

    fn memoriam_form() -> OrderForm {
        let OrderForm::Living(base) = living_form() else {
            unreachable!()
        };
        OrderForm::Memoriam(MemoriamFormData {
            base,
            funeral_home_name: Some("Evergreen".to_string()),
            funeral_home_rep: None,
            photograph_disposition: None,
        })
    }

    #[tokio::test]
    async fn test_successful_submission_runs_all_steps_in_order() {
        let store = MockStore::new(FailOn::Nothing);
        let order_id = submit_order(&store, &living_form()).await.unwrap();

        assert!(!order_id.is_nil());
        assert_eq!(
            store.calls(),
            vec!["insert_base_order", "insert_detail", "insert_mediums"]
        );
    }

    #[tokio::test]
    async fn test_base_order_failure_needs_no_compensation() {
        let store = MockStore::new(FailOn::BaseOrder);
        let err = submit_order(&store, &living_form()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        // No identifier persisted, so nothing to undo.
        assert_eq!(store.calls(), vec!["insert_base_order"]);
    }

    #[tokio::test]
    async fn test_detail_failure_deletes_base_order() {
        let store = MockStore::new(FailOn::Detail);
        let err = submit_order(&store, &living_form()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(
            store.calls(),
            vec!["insert_base_order", "insert_detail", "delete_base_order"]
        );
    }

    #[tokio::test]
    async fn test_mediums_failure_unwinds_in_reverse_order() {
        let store = MockStore::new(FailOn::Mediums);
        let err = submit_order(&store, &memoriam_form()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(
            store.calls(),
            vec![
                "insert_base_order",
                "insert_detail",
                "insert_mediums",
                "delete_detail",
                "delete_base_order"
            ]
        );
    }

    #[tokio::test]
    async fn test_compensation_failure_still_reports_original_error() {
        let mut store = MockStore::new(FailOn::Mediums);
        store.fail_compensation = true;
        let err = submit_order(&store, &living_form()).await.unwrap_err();

        // The injected insert failure is surfaced, not the compensation
        // failure, and the unwind still attempts every step.
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(
            store.calls(),
            vec![
                "insert_base_order",
                "insert_detail",
                "insert_mediums",
                "delete_detail",
                "delete_base_order"
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_payload_never_touches_store() {
        let store = MockStore::new(FailOn::Nothing);
        let OrderForm::Living(mut data) = living_form() else {
            unreachable!()
        };
        data.email = "not-an-email".to_string();
        let err = submit_order(&store, &OrderForm::Living(data))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resubmission_generates_distinct_identifiers() {
        let store = MockStore::new(FailOn::Nothing);
        let form = living_form();
        let first = submit_order(&store, &form).await.unwrap();
        let second = submit_order(&store, &form).await.unwrap();

        assert_ne!(first, second);
    }
}
