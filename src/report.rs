//! Tabular text rendering of an aggregate result.
//!
//! Produces the fixed per-provider format the companion CLI prints:
//! a provider header followed by one indented line per host field.
//! Providers that contributed no hosts are skipped.

use crate::resolver::ProviderResult;
use std::fmt::Write;

/// Renders `results` into the fixed tabular text format.
pub fn render(results: &[ProviderResult]) -> String {
    let mut out = String::new();
    for entry in results {
        if entry.hosts.is_empty() {
            continue;
        }
        // Infallible writes: the sink is a String.
        let _ = writeln!(out, "Provider: {}", entry.provider);
        for host in &entry.hosts {
            let _ = writeln!(out, "\tId: \t\t{}", host.id);
            let _ = writeln!(out, "\tRegion: \t{}", host.region);
            let _ = writeln!(out, "\tZone: \t\t{}", host.zone);
            let _ = writeln!(out, "\tprivate ipv4: \t{}", host.private_ipv4);
            let _ = writeln!(out, "\tpublic ipv4: \t{}", host.public_ipv4);
            let _ = writeln!(out, "\tprivate ipv6: \t{}", host.private_ipv6);
            let _ = writeln!(out, "\tpublic ipv6: \t{}", host.public_ipv6);
            let _ = writeln!(out, "\tprivate name: \t{}", host.private_name);
            let _ = writeln!(out, "\tpublic name: \t{}", host.public_name);
            let _ = writeln!(out, "\tprivate: \t{}", host.private);
            let _ = writeln!(out, "\tpublic: \t{}", host.public);
            let _ = writeln!(out);
        }
    }
    out
}
