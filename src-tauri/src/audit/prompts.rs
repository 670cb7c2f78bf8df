//! Prompts for the audit generation call.

use super::types::AuditRequest;

/// Fixed system instruction: the five analysis areas, the exact output
/// schema and the formatting rules. Enforced through the prompt because the
/// search tool cannot be combined with a response schema.
pub const SEO_SYSTEM_INSTRUCTION: &str = r#"Du bist ein erfahrener SEO-Consultant und Web-Analyst. Deine Aufgabe ist es, einen strukturierten, interaktiven SEO-Audit im JSON-Format zu erstellen.

ANALYSE-BEREICHE:
1. Technisches SEO (Crawlability, HTTPS, Core Web Vitals, Mobile)
2. OnPage & Content (Meta-Daten, Headlines, Keywords, Content-Qualität)
3. OffPage & Authority (Backlink-Signale, Brand-Wahrnehmung)
4. Local SEO (Google Business Profile, NAP - nur wenn relevant, sonst überspringen)
5. UX & Conversion (Call-to-Action, Navigation, Trust-Elemente)

OUTPUT FORMAT:
Du MUSST ein valides JSON-Objekt zurückgeben. Das JSON muss exakt dieses Schema erfüllen:

{
  "domain": "string",
  "overallScore": number (0-100),
  "executiveSummary": ["string", "string"], (3-5 wichtigste Punkte)
  "sections": [
    {
      "id": "tech | onpage | offpage | local | ux",
      "title": "string",
      "score": number (0-100),
      "status": "Gut" | "Warnung" | "Kritisch",
      "findings": "string (Kurze Zusammenfassung der Analyse)",
      "checklist": [
        {
          "task": "string (Kurze, knackige Handlungsaufforderung)",
          "description": "string (Erklärung, warum und wie)",
          "priority": "Hoch" | "Mittel" | "Niedrig",
          "difficulty": "Leicht" | "Mittel" | "Schwer"
        }
      ]
    }
  ]
}

WICHTIG:
- Sei sehr konkret. Statt "Meta Tags optimieren", schreibe "Title-Tag auf max. 60 Zeichen kürzen".
- Nutze Google Search Tools, um echte Daten (z.B. Indexierungsstatus, vorhandene Snippets) zu finden.
- Sprache: Deutsch.
"#;

/// Section ids the system instruction allows.
pub const SECTION_IDS: [&str; 5] = ["tech", "onpage", "offpage", "local", "ux"];

/// Build the per-request prompt embedding the target URL and optional hints.
pub fn build_audit_prompt(request: &AuditRequest) -> String {
    let mut prompt = format!("Analysiere diese Webseite: {}\n", request.url.trim());

    if let Some(industry) = request.industry() {
        prompt.push_str(&format!("Branche: {}\n", industry));
    }
    if let Some(goal) = request.goal() {
        prompt.push_str(&format!("Ziel: {}\n", goal));
    }

    prompt.push_str(
        "\nErstelle einen detaillierten Audit mit Checklisten.\n\
         ANTWORTE AUSSCHLIESSLICH MIT DEM JSON-OBJEKT. KEIN MARKDOWN, KEIN PREAMBLE.\n",
    );
    prompt
}
