use axum::response::Html;

/// GET /
/// The single-page UI: upload a résumé, pick an action, read the result.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Resume Chatbot</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  #job-role-row { display: none; }
  #status { margin-top: 1rem; color: #2e7d32; }
  #result { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 6px; }
  #result.error, #status.error { color: #b00020; background: #fdecea; }
</style>
</head>
<body>
<h1>AI Resume Chatbot</h1>
<p>Hi, I'm your Resume Analyser Bot! Please upload your resume to get started.</p>

<form id="session-form">
  <label for="file">Upload your resume (PDF)</label>
  <input id="file" name="file" type="file" accept="application/pdf,.pdf" required>

  <label for="action">Choose an action:</label>
  <select id="action" name="action">
    <option value=""></option>
    <option value="analyze_resume">Resume Analysis</option>
    <option value="recommend_jobs">Job Recommendations</option>
    <option value="match_job">Job Matching</option>
  </select>

  <div id="job-role-row">
    <label for="job_role">Enter the job role you're interested in:</label>
    <input id="job_role" name="job_role" type="text">
  </div>

  <p><button type="submit">Submit</button></p>
</form>

<div id="status"></div>
<h3 id="heading"></h3>
<div id="result"></div>

<script>
  const form = document.getElementById("session-form");
  const action = document.getElementById("action");
  const status = document.getElementById("status");
  const heading = document.getElementById("heading");
  const result = document.getElementById("result");

  action.addEventListener("change", () => {
    document.getElementById("job-role-row").style.display =
      action.value === "match_job" ? "block" : "none";
  });

  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    status.className = ""; result.className = "";
    status.textContent = "Working..."; heading.textContent = ""; result.textContent = "";

    const response = await fetch("/api/v1/session", { method: "POST", body: new FormData(form) });
    const body = await response.json();

    if (!response.ok) {
      status.className = "error";
      status.textContent = body.error ? body.error.message : "Request failed";
      return;
    }

    status.textContent = body.upload_message;
    if (body.result) {
      heading.textContent = body.result.heading + ":";
      const outcome = body.result.outcome;
      if (outcome.status === "ok") {
        result.textContent = outcome.text;
      } else {
        result.className = "error";
        result.textContent = outcome.reason;
      }
    } else if (body.job_role_required) {
      heading.textContent = "Enter a job role to run Job Matching.";
    } else {
      heading.textContent = "Resume Analysis Complete! What would you like to do next?";
      result.textContent = body.actions.map((a, i) => (i + 1) + ". " + a.label).join("\n");
    }
  });
</script>
</body>
</html>
"#;
