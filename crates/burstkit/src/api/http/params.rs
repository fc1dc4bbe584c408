use std::collections::HashSet;

use crate::entity::MultiOutRecipient;
use crate::error::ClientError;
use crate::value::BurstAddress;

/// Recipient-count bounds for the weighted multi-out operation.
const MULTI_OUT_RECIPIENTS: std::ops::RangeInclusive<usize> = 2..=64;
/// Recipient-count bounds for the equal-split multi-out operation.
const MULTI_OUT_SAME_RECIPIENTS: std::ops::RangeInclusive<usize> = 2..=128;

/// Query parameters for one request.
///
/// Unset optional parameters are never pushed, so the wire never carries
/// empty strings or literal nulls.
#[derive(Debug, Default)]
pub(super) struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    pub(super) fn set_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub(super) fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Serialize weighted multi-out recipients as `id:planck;id:planck;...`.
///
/// Bounds are enforced here, before any request is issued.
pub(super) fn multi_out_recipients(
    recipients: &[MultiOutRecipient],
) -> Result<String, ClientError> {
    if !MULTI_OUT_RECIPIENTS.contains(&recipients.len()) {
        return Err(ClientError::InvalidArgument(format!(
            "weighted multi-out requires 2-64 recipients, got {}",
            recipients.len()
        )));
    }
    Ok(recipients
        .iter()
        .map(|r| format!("{}:{}", r.recipient.to_wire_string(), r.amount.to_planck_string()))
        .collect::<Vec<_>>()
        .join(";"))
}

/// Serialize equal-split multi-out recipients as `id;id;...`.
///
/// Bounds and distinctness are enforced here, before any request is issued;
/// a duplicated recipient would silently change what the node builds.
pub(super) fn multi_out_same_recipients(
    recipients: &[BurstAddress],
) -> Result<String, ClientError> {
    if !MULTI_OUT_SAME_RECIPIENTS.contains(&recipients.len()) {
        return Err(ClientError::InvalidArgument(format!(
            "equal-split multi-out requires 2-128 recipients, got {}",
            recipients.len()
        )));
    }
    let mut seen = HashSet::with_capacity(recipients.len());
    for recipient in recipients {
        if !seen.insert(recipient.id()) {
            return Err(ClientError::InvalidArgument(format!(
                "duplicate equal-split recipient {recipient}"
            )));
        }
    }
    Ok(recipients
        .iter()
        .map(BurstAddress::to_wire_string)
        .collect::<Vec<_>>()
        .join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{BurstId, BurstValue};

    fn weighted(n: usize) -> Vec<MultiOutRecipient> {
        (0..n)
            .map(|i| MultiOutRecipient {
                recipient: BurstAddress::from_id(BurstId(i as u64 + 1)),
                amount: BurstValue::from_planck((i as u64 + 1) * 100),
            })
            .collect()
    }

    fn addresses(n: usize) -> Vec<BurstAddress> {
        (0..n).map(|i| BurstAddress::from_id(BurstId(i as u64 + 1))).collect()
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let mut params = QueryParams::new();
        params.set("recipient", "123");
        params.set_opt("name", None::<String>);
        params.set_opt("description", Some("hi"));
        assert_eq!(
            params.pairs(),
            &[("recipient", "123".to_owned()), ("description", "hi".to_owned())]
        );
    }

    #[test]
    fn weighted_recipient_string_has_no_trailing_delimiter() {
        let joined = multi_out_recipients(&weighted(2)).expect("should serialize");
        assert_eq!(joined, "1:100;2:200");
    }

    #[test]
    fn weighted_bounds() {
        assert!(matches!(
            multi_out_recipients(&weighted(1)),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(multi_out_recipients(&weighted(2)).is_ok());
        assert!(multi_out_recipients(&weighted(64)).is_ok());
        assert!(matches!(
            multi_out_recipients(&weighted(65)),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn equal_split_recipient_string() {
        let joined = multi_out_same_recipients(&addresses(3)).expect("should serialize");
        assert_eq!(joined, "1;2;3");
    }

    #[test]
    fn equal_split_bounds() {
        assert!(matches!(
            multi_out_same_recipients(&addresses(1)),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(multi_out_same_recipients(&addresses(128)).is_ok());
        assert!(matches!(
            multi_out_same_recipients(&addresses(129)),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn equal_split_rejects_duplicates() {
        let mut recipients = addresses(3);
        recipients[2] = recipients[0];
        assert!(matches!(
            multi_out_same_recipients(&recipients),
            Err(ClientError::InvalidArgument(_))
        ));
    }
}
