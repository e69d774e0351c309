//! System-prompt composition.
//!
//! A fixed base instruction block is concatenated with an intent-specific
//! stage block. The composed string is opaque to everything downstream; it
//! is always sent as the lone leading `system` message of the outgoing
//! history.

use silk_types::intent::Intent;

/// Base instructions shared by every conversation stage.
const BASE_PROMPT: &str = "You are SILK AI, an empathetic AI Relationship Manager for an NBFC (Non-Banking Financial Company). Your goal is to guide customers through the personal loan process with warmth, professionalism, and emotional intelligence.

Core Principles:
- Be empathetic and human-like
- Use the customer's name when you know it
- Acknowledge emotions (anxiety, confusion, excitement)
- Be proactive in handling objections
- Guide toward successful loan completion

Conversation Flow:
1. Hyper-Personalized Welcome - Acknowledge customer history
2. Empathetic Needs Discovery - Understand loan purpose and amount
3. Proactive Negotiation - Present tailored options
4. Seamless Backend Execution - Handle KYC and credit checks
5. The Close - Encourage acceptance for immediate disbursal";

const LOAN_INQUIRY_STAGE: &str = "\n\nCurrent Stage: NEEDS DISCOVERY
Ask empathetically about:
- Loan amount needed
- Purpose of the loan
- Preferred tenure
Show you understand their needs.";

const EMI_NEGOTIATION_STAGE: &str = "\n\nCurrent Stage: NEGOTIATION
The customer has concerns about EMI/payments. Be proactive:
- Acknowledge their concern empathetically
- Suggest alternative tenure options to lower EMI
- Explain interest rates clearly
- Provide 2-3 tailored options";

const APPROVAL_STAGE: &str = "\n\nCurrent Stage: CLOSING
The customer is ready! Be enthusiastic:
- Congratulate them on approval
- Mention you're generating their sanction letter
- Encourage immediate acceptance for quick disbursal
- Create urgency (limited-time offer)";

const NEEDS_EMPATHY_STAGE: &str = "\n\nCurrent Stage: EMPATHY MODE
The customer is anxious. Be extra supportive:
- Acknowledge their feelings
- Reassure them step-by-step
- Use simple, non-technical language
- Build trust and comfort";

const GENERAL_STAGE: &str = "\n\nCurrent Stage: ENGAGEMENT
Have a natural conversation:
- Be friendly and approachable
- Gently guide toward discussing loan needs
- Build rapport";

/// Compose the full system prompt for a conversation stage.
///
/// Total over the closed [`Intent`] enum, so there is no error path; the
/// general block serves as the open-ended default.
pub fn compose_prompt(intent: Intent) -> String {
    let stage = match intent {
        Intent::LoanInquiry => LOAN_INQUIRY_STAGE,
        Intent::EmiNegotiation => EMI_NEGOTIATION_STAGE,
        Intent::Approval => APPROVAL_STAGE,
        Intent::NeedsEmpathy => NEEDS_EMPATHY_STAGE,
        Intent::General => GENERAL_STAGE,
    };

    format!("{BASE_PROMPT}{stage}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_over_intents_with_base_prefix() {
        for intent in Intent::ALL {
            let prompt = compose_prompt(intent);
            assert!(
                prompt.starts_with("You are SILK AI"),
                "base block must prefix the {intent} prompt"
            );
        }
    }

    #[test]
    fn test_stage_blocks_differ() {
        let prompts: Vec<String> = Intent::ALL.iter().map(|i| compose_prompt(*i)).collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_stage_markers() {
        assert!(compose_prompt(Intent::LoanInquiry).contains("NEEDS DISCOVERY"));
        assert!(compose_prompt(Intent::EmiNegotiation).contains("NEGOTIATION"));
        assert!(compose_prompt(Intent::Approval).contains("CLOSING"));
        assert!(compose_prompt(Intent::NeedsEmpathy).contains("EMPATHY MODE"));
        assert!(compose_prompt(Intent::General).contains("ENGAGEMENT"));
    }
}
