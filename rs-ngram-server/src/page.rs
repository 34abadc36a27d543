/// Values echoed back into the generator form.
#[derive(Debug, Default)]
pub struct PageState {
	pub title: String,
	pub n_value: String,
	pub prefix_value: String,
	pub length_value: String,
	pub generated_sentence: String,
	pub error_message: String,
}

/// Escapes text for use inside HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			// Keeps echoed values from forming template placeholders
			'{' => out.push_str("&#123;"),
			_ => out.push(c),
		}
	}
	out
}

/// Renders the generator page.
pub fn render(state: &PageState) -> String {
	let error_block = if state.error_message.is_empty() {
		String::new()
	} else {
		format!(r#"<div class="alert alert-danger mt-3">{}</div>"#, escape_html(&state.error_message))
	};

	let generated_block = if state.generated_sentence.is_empty() {
		String::new()
	} else {
		format!(
			r#"<div class="alert alert-success mt-3"><strong>Generated Sentence:</strong><p id="generated-text" class="typing-effect" data-sentence="{}"></p></div>"#,
			escape_html(&state.generated_sentence)
		)
	};

	TEMPLATE
		.replace("{{ title }}", &escape_html(&state.title))
		.replace("{{ n_value }}", &escape_html(&state.n_value))
		.replace("{{ prefix_value }}", &escape_html(&state.prefix_value))
		.replace("{{ length_value }}", &escape_html(&state.length_value))
		.replace("{{ error_block }}", &error_block)
		.replace("{{ generated_block }}", &generated_block)
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<title>{{ title }}</title>
	<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
	<style>
		body { background-color: #f8f9fa; }
		.container { max-width: 600px; margin-top: 50px; padding: 30px; background: white; border-radius: 10px; box-shadow: 0 0 10px rgba(0, 0, 0, 0.1); }
		.btn-primary, .btn-secondary { width: 48%; }
		.typing-effect { font-size: 1.2em; font-weight: bold; white-space: pre-wrap; word-wrap: break-word; }
	</style>
</head>
<body>
	<div class="container">
		<h2 class="text-center">N-Gram Language Model</h2>
		<form method="POST">
			<div class="mb-3">
				<label class="form-label" for="n-value">N-value:</label>
				<input type="number" min="2" max="10" id="n-value" class="form-control" name="n" required value="{{ n_value }}">
			</div>
			<div class="mb-3">
				<label class="form-label" for="prefix-input">Prefix:</label>
				<input type="text" id="prefix-input" class="form-control" name="prefix" required value="{{ prefix_value }}">
			</div>
			<div id="prefix-buttons" class="mt-2"></div>
			<div class="mb-3">
				<label class="form-label" for="length-input">Length:</label>
				<input type="number" min="0" max="10000" id="length-input" class="form-control" name="length" required value="{{ length_value }}">
			</div>
			<div class="d-flex justify-content-between">
				<button type="submit" class="btn btn-primary">Generate</button>
				<button type="submit" name="reset" value="true" class="btn btn-secondary" formnovalidate>Reset</button>
			</div>
		</form>
		{{ error_block }}
		<div class="mt-3">{{ generated_block }}</div>
	</div>
	<script>
		function updatePrefixes() {
			const n = document.getElementById("n-value").value;
			const container = document.getElementById("prefix-buttons");
			container.innerHTML = "";
			if (n < 2) {
				return;
			}
			fetch(`/v1/prefixes?n=${encodeURIComponent(n)}`)
				.then(response => response.json())
				.then(data => {
					if (!data.prefixes || data.prefixes.length === 0) {
						return;
					}
					const label = document.createElement("strong");
					label.innerText = "Suggested Prefixes:";
					container.appendChild(label);
					container.appendChild(document.createElement("br"));
					data.prefixes.forEach(prefix => {
						const button = document.createElement("button");
						button.innerText = prefix;
						button.type = "button";
						button.className = "btn btn-outline-primary m-1";
						button.onclick = () => { document.getElementById("prefix-input").value = prefix; };
						container.appendChild(button);
					});
				});
		}

		function typeEffect(element, text, i = 0) {
			if (i < text.length) {
				element.textContent += text.charAt(i);
				setTimeout(() => typeEffect(element, text, i + 1), 30);
			}
		}

		document.addEventListener("DOMContentLoaded", () => {
			document.getElementById("n-value").addEventListener("input", updatePrefixes);
			const output = document.getElementById("generated-text");
			if (output) {
				typeEffect(output, output.dataset.sentence);
			}
		});
	</script>
</body>
</html>
"##;
