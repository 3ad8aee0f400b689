use log::debug;
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::models::payment::Payment;
use crate::models::response::InsertSummary;
use crate::repository::PAYMENTS;

pub struct PaymentRepository {
    collection: Collection<Payment>,
}

impl PaymentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Payment>(PAYMENTS);
        PaymentRepository { collection }
    }

    pub async fn create(&self, payment: &Payment) -> Result<InsertSummary, ApiError> {
        debug!("insert payment: {}", payment.transaction_id);
        Ok(self.collection.insert_one(payment, None).await?.into())
    }
}
