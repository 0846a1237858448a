//! Global CSS styles for Valentine Card Studio.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* PAPER (Backgrounds) */
  --paper: #fff8f9;
  --paper-deep: #fdeef1;
  --paper-border: #f3d3da;

  /* ROSE (Actions, Focus) */
  --rose: #e84a76;
  --rose-deep: #c2315b;
  --rose-glow: rgba(232, 74, 118, 0.25);

  /* TEXT */
  --ink: #2b1b22;
  --ink-secondary: rgba(43, 27, 34, 0.7);
  --ink-muted: rgba(43, 27, 34, 0.5);

  /* SEMANTIC */
  --success: #2f9e6e;
  --danger: #d6335c;

  /* Typography */
  --font-serif: Georgia, 'Times New Roman', serif;
  --font-sans: system-ui, -apple-system, 'Segoe UI', sans-serif;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  background: var(--paper);
  color: var(--ink);
  font-family: var(--font-sans);
}

/* === Layout === */
.studio {
  max-width: 880px;
  margin: 0 auto;
  padding: 24px 32px 48px;
}

.studio-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
}

.studio-title {
  font-family: var(--font-serif);
  font-weight: 600;
  font-size: 1.6rem;
  color: var(--rose-deep);
  margin: 0;
}

/* === Step Indicator === */
.step-indicator {
  display: flex;
  gap: 20px;
  list-style: none;
  margin: 0;
  padding: 0;
}

.step {
  display: flex;
  align-items: center;
  gap: 8px;
  color: var(--ink-muted);
  font-size: 0.9rem;
}

.step-dot {
  width: 10px;
  height: 10px;
  border-radius: 50%;
  border: 2px solid var(--paper-border);
}

.step.done .step-dot { background: var(--paper-border); }
.step.current { color: var(--rose-deep); font-weight: 600; }
.step.current .step-dot { background: var(--rose); border-color: var(--rose); }

/* === Form === */
.compose-form {
  display: flex;
  flex-direction: column;
  gap: 18px;
  max-width: 520px;
}

.field {
  display: flex;
  flex-direction: column;
  gap: 6px;
}

.field-label {
  font-size: 0.8rem;
  text-transform: uppercase;
  letter-spacing: 0.06em;
  color: var(--ink-secondary);
}

.field-input {
  font: inherit;
  padding: 10px 12px;
  border: 1px solid var(--paper-border);
  border-radius: 8px;
  background: white;
  color: var(--ink);
}

.field-input:focus {
  outline: none;
  border-color: var(--rose);
  box-shadow: 0 0 0 3px var(--rose-glow);
}

.message-input { resize: vertical; }

.field-counter {
  align-self: flex-end;
  font-size: 0.8rem;
  color: var(--ink-muted);
}

.segmented { display: flex; gap: 0; }

.segment {
  flex: 1;
  font: inherit;
  padding: 8px 0;
  border: 1px solid var(--paper-border);
  background: white;
  color: var(--ink-secondary);
  cursor: pointer;
  text-transform: capitalize;
}

.segment:first-child { border-radius: 8px 0 0 8px; }
.segment:last-child { border-radius: 0 8px 8px 0; }
.segment.active { background: var(--rose); border-color: var(--rose); color: white; }

/* === Buttons === */
.actions {
  display: flex;
  gap: 12px;
  justify-content: flex-end;
  margin-top: 8px;
}

.btn-primary,
.btn-secondary {
  font: inherit;
  padding: 10px 18px;
  border-radius: 999px;
  cursor: pointer;
  transition: background 0.15s ease;
}

.btn-primary {
  border: none;
  background: var(--rose);
  color: white;
}

.btn-primary:hover:not(:disabled) { background: var(--rose-deep); }

.btn-secondary {
  border: 1px solid var(--paper-border);
  background: white;
  color: var(--ink);
}

button:disabled { opacity: 0.5; cursor: not-allowed; }

/* === Preview === */
.preview-step,
.share-step {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 20px;
}

.preview-frame {
  width: 400px;
  height: 500px;
  border-radius: 12px;
  overflow: hidden;
  box-shadow: 0 12px 40px rgba(194, 49, 91, 0.18);
}

.card-preview {
  display: block;
  width: 400px;
  height: 500px;
}

.card-preview.placeholder {
  display: flex;
  align-items: center;
  justify-content: center;
  background: var(--paper-deep);
  color: var(--ink-muted);
}

.export-buttons { display: flex; gap: 12px; }

.ack { color: var(--success); font-weight: 600; margin: 0; }

/* === Share === */
.qr-code-container {
  padding: 12px;
  background: white;
  border-radius: 12px;
  border: 1px solid var(--paper-border);
}

.qr-code-fallback { max-width: 420px; text-align: center; }
.qr-fallback-label { color: var(--ink-muted); }
.qr-fallback-text { word-break: break-all; font-size: 0.8rem; }

.share-link-row {
  display: flex;
  gap: 8px;
  width: 100%;
  max-width: 640px;
}

.share-link { flex: 1; font-size: 0.85rem; }

.copy-btn { min-width: 130px; }
.copy-btn.copied { background: var(--success); }

/* === Notice === */
.notice {
  margin-top: 20px;
  text-align: center;
  color: var(--danger);
}
"#;
