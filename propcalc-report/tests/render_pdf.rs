//! Full Typst compilation of each worksheet's summary.

use propcalc_core::{
    FeasibilityInputs, FeasibilityWorksheet, RentalInputs, RentalRoiWorksheet, RepaymentInputs,
    RepaymentWorksheet, Worksheet,
};
use propcalc_report::{SummaryLine, render_pdf, render_summary_pdf};

fn assert_pdf(bytes: &[u8]) {
    assert!(bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
    assert!(bytes.len() > 1000, "PDF seems too small");
}

#[test]
fn feasibility_pdf() {
    let input = FeasibilityInputs::baseline();
    let output = FeasibilityWorksheet.calculate(&input);

    let pdf = render_pdf::<FeasibilityWorksheet>("Property Calculator", &input, &output);

    assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    assert_pdf(&pdf.unwrap());
}

#[test]
fn rental_pdf() {
    let input = RentalInputs::baseline();
    let output = RentalRoiWorksheet.calculate(&input);

    let pdf = render_pdf::<RentalRoiWorksheet>("Property Calculator", &input, &output).unwrap();

    assert_pdf(&pdf);
}

#[test]
fn repayment_pdf() {
    let input = RepaymentInputs::baseline();
    let output = RepaymentWorksheet.calculate(&input);

    let pdf = render_pdf::<RepaymentWorksheet>("Property Calculator", &input, &output).unwrap();

    assert_pdf(&pdf);
}

#[test]
fn markup_in_title_is_escaped() {
    let lines = vec![SummaryLine {
        label: "Cost",
        value: "$1 #2 *3* _4_ [5]".to_string(),
    }];

    let pdf = render_summary_pdf("Smith & Co #1 <draft>", "Odd $ heading", &lines).unwrap();

    assert_pdf(&pdf);
}
