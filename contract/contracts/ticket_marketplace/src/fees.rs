//! Fee arithmetic for primary and resale purchases.
//!
//! Percentages are whole numbers in `0..=100` and results truncate toward zero.

use crate::types::PriceQuote;

pub const MAX_PERCENT: u32 = 100;

/// `percent` of `amount`, or `None` if the product does not fit in an `i128`.
pub fn percent_of(amount: i128, percent: u32) -> Option<i128> {
    amount
        .checked_mul(percent as i128)
        .map(|scaled| scaled / MAX_PERCENT as i128)
}

/// Primary sale: the platform fee is added on top of the ticket price.
pub fn primary_quote(price: i128, platform_fee_percent: u32) -> Option<PriceQuote> {
    let platform_fee = percent_of(price, platform_fee_percent)?;
    Some(PriceQuote {
        price,
        platform_fee,
        royalty: 0,
        total: price.checked_add(platform_fee)?,
    })
}

/// Resale: platform fee and organizer royalty are both added on top.
pub fn resale_quote(
    price: i128,
    platform_fee_percent: u32,
    royalty_percent: u32,
) -> Option<PriceQuote> {
    let platform_fee = percent_of(price, platform_fee_percent)?;
    let royalty = percent_of(price, royalty_percent)?;
    Some(PriceQuote {
        price,
        platform_fee,
        royalty,
        total: price.checked_add(platform_fee)?.checked_add(royalty)?,
    })
}

/// True if `price` can be quoted under any fee settings the admin may choose.
pub fn is_quotable(price: i128) -> bool {
    resale_quote(price, MAX_PERCENT, MAX_PERCENT).is_some()
}
