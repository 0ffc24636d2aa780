//! [`PreviewPaymentSchedule`] definition.

use tracerr::Traced;

use crate::{
    domain::{
        schedule::{self, InvalidTermsError},
        PaymentSchedule, RentalTerms,
    },
    Query, Service,
};

/// [`Query`] generating a guest [`PaymentSchedule`] out of the provided
/// [`RentalTerms`] without persisting it anywhere.
#[derive(Clone, Copy, Debug)]
pub struct PreviewPaymentSchedule(pub RentalTerms);

impl<Db> Query<PreviewPaymentSchedule> for Service<Db> {
    type Ok = PaymentSchedule;
    type Err = Traced<InvalidTermsError>;

    async fn execute(
        &self,
        PreviewPaymentSchedule(terms): PreviewPaymentSchedule,
    ) -> Result<Self::Ok, Self::Err> {
        schedule::generate(&terms).map_err(tracerr::wrap!())
    }
}
