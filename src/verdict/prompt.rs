//! Verdict prompt construction.

use crate::domain::DomainInfo;
use crate::redirects::RedirectInfo;

/// Builds the structured analysis prompt sent to the model.
///
/// Deterministic for a given input triple, so prompts are reproducible in
/// tests and logs. The model is asked for a constrained JSON object; the
/// tolerant parser in [`super::parse`] handles everything it sends back
/// anyway.
pub fn build_prompt(url: &str, domain_info: &DomainInfo, redirect_info: &RedirectInfo) -> String {
    format!(
        "Analyze this URL for potential security threats, scams, or fraud:\n\
         \n\
         URL: {url}\n\
         Domain: {domain}\n\
         Subdomain: {subdomain}\n\
         Redirects: {redirects}\n\
         Final URL: {final_url}\n\
         \n\
         Please provide:\n\
         1. A verdict: \"Safe\", \"Suspicious\", or \"Malicious\"\n\
         2. A confidence score (0-100%)\n\
         3. A brief explanation of your reasoning\n\
         4. Specific threats detected (if any)\n\
         \n\
         Focus on:\n\
         - Phishing patterns\n\
         - Suspicious domain characteristics\n\
         - Typosquatting\n\
         - Malware indicators\n\
         - Social engineering attempts\n\
         \n\
         Respond in JSON format:\n\
         {{\n\
             \"verdict\": \"Safe/Suspicious/Malicious\",\n\
             \"confidence\": 85,\n\
             \"explanation\": \"Brief explanation here\",\n\
             \"threats_detected\": [\"threat1\", \"threat2\"]\n\
         }}",
        url = url,
        domain = domain_info.domain,
        subdomain = domain_info.subdomain,
        redirects = redirect_info.redirect_count,
        final_url = redirect_info.final_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_signals() {
        let domain_info = DomainInfo {
            domain: "example.com".into(),
            subdomain: "login".into(),
            full_domain: "login.example.com".into(),
        };
        let redirect_info = RedirectInfo {
            redirect_count: 2,
            final_url: "https://final.example.com/".into(),
            suspicious_redirect: false,
        };
        let prompt = build_prompt("https://login.example.com", &domain_info, &redirect_info);
        assert!(prompt.contains("URL: https://login.example.com"));
        assert!(prompt.contains("Domain: example.com"));
        assert!(prompt.contains("Subdomain: login"));
        assert!(prompt.contains("Redirects: 2"));
        assert!(prompt.contains("Final URL: https://final.example.com/"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let domain_info = DomainInfo::default();
        let redirect_info = RedirectInfo::default();
        let a = build_prompt("https://example.com", &domain_info, &redirect_info);
        let b = build_prompt("https://example.com", &domain_info, &redirect_info);
        assert_eq!(a, b);
    }
}
