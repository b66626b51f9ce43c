use anyhow::Result;

use ota_core::ResponseResult;

/**
    How the decoded response is written to stdout.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented JSON of code, message and body.
    #[default]
    Pretty,
    /// Single-line JSON of code, message and body.
    Json,
    /// Decrypted payload only, as text.
    Raw,
}

pub fn render(result: &ResponseResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty => result.to_pretty_json()?,
        OutputFormat::Json => result.to_json()?,
        OutputFormat::Raw => result.payload_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ResponseResult {
        ResponseResult {
            response_code: 200,
            err_msg: "success".into(),
            payload: br#"{"components":[]}"#.to_vec(),
        }
    }

    #[test]
    fn raw_is_payload() {
        assert_eq!(
            render(&result(), OutputFormat::Raw).unwrap(),
            r#"{"components":[]}"#
        );
    }

    #[test]
    fn json_is_single_line() {
        let out = render(&result(), OutputFormat::Json).unwrap();
        assert_eq!(
            out,
            r#"{"responseCode":200,"errMsg":"success","body":{"components":[]}}"#
        );
    }

    #[test]
    fn pretty_is_indented() {
        let out = render(&result(), OutputFormat::Pretty).unwrap();
        assert!(out.contains('\n'));
        assert!(out.contains("  \"responseCode\": 200"));
    }
}
