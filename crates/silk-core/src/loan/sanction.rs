//! Sanction-letter rendering.
//!
//! Produces the self-contained HTML document sent back once an offer is
//! approved. Amounts are grouped in the Indian numbering style (lakhs and
//! crores), dates formatted like "05 August 2026".

use chrono::{DateTime, Utc};

use silk_types::loan::{SanctionLetter, SanctionTerms};

/// Generate the reference number for a sanction letter.
///
/// `SILK-` followed by the last eight digits of the epoch-millisecond
/// timestamp, which is unique enough for a per-customer document id.
pub fn reference_no(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().unsigned_abs().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("SILK-{tail}")
}

/// Group an amount in the Indian numbering style: 1,00,000.
fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        let remaining = len - i - 1;
        if remaining == 0 {
            continue;
        }
        // The last group holds three digits, every group before it two.
        if remaining % 2 == 1 && remaining >= 3 {
            grouped.push(',');
        }
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Render the sanction letter for an approved loan.
pub fn render_letter(
    customer_name: &str,
    terms: &SanctionTerms,
    sanctioned_at: DateTime<Utc>,
) -> SanctionLetter {
    let reference_no = reference_no(sanctioned_at);
    let sanction_date = sanctioned_at.format("%d %B %Y").to_string();
    let amount = format_inr(terms.loan_amount.round() as i64);
    let emi = format_inr(terms.emi);
    let fee = format_inr(terms.processing_fee());
    let interest_rate = terms.interest_rate;
    let tenure = terms.tenure;

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; padding: 40px; }}
    .header {{ text-align: center; border-bottom: 3px solid #0891b2; padding-bottom: 20px; }}
    .logo {{ font-size: 32px; font-weight: bold; color: #0891b2; }}
    .content {{ margin-top: 30px; line-height: 1.8; }}
    .details {{ background: #f0f9ff; padding: 20px; margin: 20px 0; border-left: 4px solid #0891b2; }}
    .signature {{ margin-top: 60px; }}
    .footer {{ margin-top: 40px; text-align: center; font-size: 12px; color: #666; }}
  </style>
</head>
<body>
  <div class="header">
    <div class="logo">🏦 SILK FINANCE</div>
    <p>Your Trusted Financial Partner</p>
  </div>

  <div class="content">
    <p><strong>Date:</strong> {sanction_date}</p>
    <p><strong>Reference No:</strong> {reference_no}</p>

    <h2>LOAN SANCTION LETTER</h2>

    <p>Dear {customer_name},</p>

    <p>We are pleased to inform you that your personal loan application has been <strong>APPROVED</strong>!</p>

    <div class="details">
      <h3>Loan Details:</h3>
      <p><strong>Sanctioned Amount:</strong> ₹{amount}</p>
      <p><strong>Interest Rate:</strong> {interest_rate}% per annum</p>
      <p><strong>Tenure:</strong> {tenure} months</p>
      <p><strong>Monthly EMI:</strong> ₹{emi}</p>
      <p><strong>Processing Fee:</strong> ₹{fee} (2% of loan amount)</p>
    </div>

    <p>This sanction is valid for <strong>30 days</strong> from the date of this letter. To proceed with the disbursal, please accept this offer in the chat interface.</p>

    <p><strong>Next Steps:</strong></p>
    <ul>
      <li>Accept the offer in the chat</li>
      <li>Complete KYC verification (if pending)</li>
      <li>Sign the loan agreement digitally</li>
      <li>Receive instant disbursal to your account</li>
    </ul>

    <div class="signature">
      <p><strong>Authorized Signatory</strong><br>
      SILK Finance Limited<br>
      Registration No: U65999MH2020PTC123456</p>
    </div>

    <div class="footer">
      <p>This is a computer-generated document and does not require a physical signature.</p>
      <p>SILK Finance Ltd. | Registered Office: Mumbai, India | CIN: U65999MH2020PTC123456</p>
    </div>
  </div>
</body>
</html>
"#
    );

    SanctionLetter { reference_no, html }
}
