//! The in-memory collection of transactions.

use time::Date;

use crate::transaction::{
    core::{Transaction, TransactionBuilder, TransactionId},
    sample::sample_transactions,
};

/// Holds every transaction for the lifetime of the process.
///
/// The store is owned by the composition root and is only changed through
/// [TransactionStore::add], [TransactionStore::add_all],
/// [TransactionStore::update] and [TransactionStore::remove]. Changes are
/// visible to the next read straight away.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    /// Newest first.
    transactions: Vec<Transaction>,
    last_id: u64,
}

impl TransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample transactions shown on a fresh start.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        // Seeded in display order, the first sample gets ID 1.
        for builder in sample_transactions() {
            store.last_id += 1;
            store
                .transactions
                .push(builder.finalise(TransactionId::new(store.last_id)));
        }
        store
    }

    /// Add a transaction to the front of the store and return its new ID.
    ///
    /// No duplicate check is done, the same details may be added many times.
    pub fn add(&mut self, builder: TransactionBuilder) -> TransactionId {
        self.last_id += 1;
        let id = TransactionId::new(self.last_id);
        let transaction = builder.finalise(id);

        if !transaction.has_permitted_category() {
            tracing::warn!(
                "Transaction {id} has category \"{}\" which is not permitted for {}",
                transaction.category,
                transaction.transaction_type
            );
        }

        self.transactions.insert(0, transaction);
        id
    }

    /// Add each transaction in `builders`, in order.
    pub fn add_all(&mut self, builders: impl IntoIterator<Item = TransactionBuilder>) {
        let count_before = self.transactions.len();

        for builder in builders {
            self.add(builder);
        }

        tracing::debug!(
            "Added {} transactions to the store",
            self.transactions.len() - count_before
        );
    }

    /// Replace the stored transaction that has the same ID as `transaction`.
    ///
    /// Does nothing if there is no transaction with that ID.
    pub fn update(&mut self, transaction: Transaction) {
        let Some(existing) = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
        else {
            tracing::debug!(
                "Ignoring update for transaction {} which is not in the store",
                transaction.id
            );
            return;
        };

        if !transaction.has_permitted_category() {
            tracing::warn!(
                "Transaction {} was updated with category \"{}\" which is not permitted for {}",
                transaction.id,
                transaction.category,
                transaction.transaction_type
            );
        }

        *existing = transaction;
    }

    /// Remove the transaction with `id`.
    ///
    /// Does nothing if there is no transaction with that ID.
    pub fn remove(&mut self, id: TransactionId) {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            tracing::debug!("Ignoring removal of transaction {id} which is not in the store");
        }
    }

    /// Get the transaction with `id`.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// All transactions, most recently added first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions ordered by date, latest first.
    ///
    /// Transactions on the same date keep their store order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// The date of the latest transaction, `None` if the store is empty.
    pub fn last_updated(&self) -> Option<Date> {
        self.transactions
            .iter()
            .map(|transaction| transaction.date)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        chart_of_accounts::{Category, TransactionType},
        transaction::{Amount, Transaction, TransactionBuilder, TransactionId, TransactionStore},
    };

    fn expense(amount: u32, date: time::Date) -> TransactionBuilder {
        Transaction::build(
            TransactionType::Expense,
            Category::PaymentFees,
            date,
            Amount::from_whole(amount),
        )
    }

    #[test]
    fn add_assigns_unique_ids_and_prepends() {
        let mut store = TransactionStore::new();

        let first = store.add(expense(10, date!(2025 - 01 - 01)));
        let second = store.add(expense(10, date!(2025 - 01 - 01)));

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].id, second);
        assert_eq!(store.transactions()[1].id, first);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut store = TransactionStore::new();
        let first = store.add(expense(10, date!(2025 - 01 - 01)));
        store.remove(first);

        let second = store.add(expense(10, date!(2025 - 01 - 01)));

        assert_ne!(first, second);
    }

    #[test]
    fn update_replaces_matching_transaction() {
        let mut store = TransactionStore::new();
        let id = store.add(expense(10, date!(2025 - 01 - 01)));
        let mut updated = store.get(id).unwrap().clone();
        updated.amount = Amount::from_whole(99);
        updated.description = Some("Tarifa".to_owned());

        store.update(updated.clone());

        assert_eq!(store.get(id), Some(&updated));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_with_unknown_id_is_a_no_op() {
        let mut store = TransactionStore::with_sample_data();
        let before = store.transactions().to_vec();
        let stranger = expense(1, date!(2025 - 01 - 01)).finalise(TransactionId::new(999));

        store.update(stranger);

        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn update_keeps_category_outside_chart() {
        let mut store = TransactionStore::new();
        let id = store.add(expense(10, date!(2025 - 01 - 01)));
        let mut updated = store.get(id).unwrap().clone();
        updated.category = Category::from_name("Conta de Energia");

        store.update(updated);

        assert_eq!(
            store.get(id).unwrap().category,
            Category::Unknown("Conta de Energia".to_owned())
        );
    }

    #[test]
    fn remove_deletes_matching_transaction() {
        let mut store = TransactionStore::new();
        let keep = store.add(expense(10, date!(2025 - 01 - 01)));
        let delete = store.add(expense(20, date!(2025 - 01 - 02)));

        store.remove(delete);

        assert_eq!(store.len(), 1);
        assert!(store.get(delete).is_none());
        assert!(store.get(keep).is_some());
    }

    #[test]
    fn remove_with_unknown_id_is_a_no_op() {
        let mut store = TransactionStore::with_sample_data();
        let before = store.transactions().to_vec();

        store.remove(TransactionId::new(999));

        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn add_all_adds_every_builder() {
        let mut store = TransactionStore::new();

        store.add_all(vec![
            expense(1, date!(2025 - 01 - 01)),
            expense(2, date!(2025 - 01 - 02)),
            expense(3, date!(2025 - 01 - 03)),
        ]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.transactions()[0].amount, Amount::from_whole(3));
    }

    #[test]
    fn sample_data_has_three_transactions_in_entry_order() {
        let store = TransactionStore::with_sample_data();

        let ids: Vec<String> = store
            .transactions()
            .iter()
            .map(|transaction| transaction.id.to_string())
            .collect();

        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(store.transactions()[0].category, Category::ProductSales);
    }

    #[test]
    fn sorted_by_date_desc_puts_latest_first() {
        let mut store = TransactionStore::new();
        let old = store.add(expense(1, date!(2024 - 12 - 31)));
        let new = store.add(expense(2, date!(2025 - 02 - 01)));
        let middle = store.add(expense(3, date!(2025 - 01 - 15)));

        let sorted: Vec<TransactionId> = store
            .sorted_by_date_desc()
            .iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(sorted, vec![new, middle, old]);
    }

    #[test]
    fn last_updated_is_latest_date() {
        let mut store = TransactionStore::new();
        assert_eq!(store.last_updated(), None);

        store.add(expense(1, date!(2025 - 03 - 07)));
        store.add(expense(1, date!(2024 - 03 - 08)));

        assert_eq!(store.last_updated(), Some(date!(2025 - 03 - 07)));
    }
}
