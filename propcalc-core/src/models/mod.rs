mod feasibility;
mod fields;
mod fraction;
mod rental;
mod repayment;

pub use feasibility::{
    FeasibilityField, FeasibilityInputs, FeasibilityInputsBuilder, FeasibilityOutputs,
};
pub use fields::{
    FieldEntry, FieldKind, InputField, InputRecord, InputsBuilder, MAX_AMOUNT, OutputRecord,
};
pub use fraction::{Fraction, normalize_fraction};
pub use rental::{RentalField, RentalInputs, RentalInputsBuilder, RentalOutputs};
pub use repayment::{RepaymentField, RepaymentInputs, RepaymentOutputs};
