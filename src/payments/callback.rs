use reqwest::Url;

/// The two query parameters the hosted checkout sends back through the
/// custom-scheme redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub status: String,
    pub payment_id: i64,
}

/// Parses a redirect callback URL, checking the scheme and extracting the
/// `status` and `payment_id` query parameters.
pub fn parse_callback(raw: &str, expected_scheme: &str) -> Result<CallbackParams, String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid callback URL: {}", e))?;
    if url.scheme() != expected_scheme {
        return Err(format!(
            "Callback scheme '{}' does not match expected '{}'",
            url.scheme(),
            expected_scheme
        ));
    }

    let mut status = None;
    let mut payment_id = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "status" => status = Some(value.into_owned()),
            "payment_id" => payment_id = Some(value.into_owned()),
            _ => {}
        }
    }

    let status = status.ok_or_else(|| "Callback is missing 'status'".to_string())?;
    let payment_id = payment_id
        .ok_or_else(|| "Callback is missing 'payment_id'".to_string())?
        .parse::<i64>()
        .map_err(|e| format!("Callback 'payment_id' is not a number: {}", e))?;

    Ok(CallbackParams { status, payment_id })
}
