use solar_core::catalog;

const OPTIONS_PLACEHOLDER: &str = "{options}";

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>🌞 Dashboard Solar RD</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/chartjs-plugin-zoom@2.0.0"></script>
    <style>
        body { font-family: Arial, sans-serif; background: #f5f5f5; padding: 20px; }
        h1 { text-align: center; color: #1b4d89; }
        select { padding: 8px; margin: 10px; font-size: 16px; }
        canvas { background: white; border-radius: 8px; box-shadow: 0px 0px 10px rgba(0,0,0,0.1); }
        .info-box { text-align: center; margin-top: 20px; font-size: 18px; background: #e0f7fa; padding: 10px; border-radius: 8px; }
        .info-box.error { background: #fdecea; color: #8a1c1c; }
    </style>
</head>
<body>
    <h1>☀️ Producción Solar - República Dominicana</h1>
    <div style="text-align:center;">
        <label for="provincia">Selecciona una provincia:</label>
        <select id="provincia" onchange="loadRadiation()">
            {options}
        </select>
    </div>
    <canvas id="radiationChart" width="800" height="400"></canvas>
    <div class="info-box" id="infoBox">Selecciona una provincia para ver la información.</div>

    <script>
        const ctx = document.getElementById('radiationChart').getContext('2d');
        const infoBox = document.getElementById('infoBox');
        let chart;

        function showError(message) {
            if (chart) { chart.destroy(); chart = undefined; }
            infoBox.classList.add('error');
            infoBox.textContent = '⚠️ ' + message;
        }

        async function loadRadiation() {
            const provincia = document.getElementById('provincia').value;
            let data;
            try {
                const response = await fetch('/radiation?provincia=' + encodeURIComponent(provincia));
                data = await response.json();
            } catch (err) {
                showError('No se pudo contactar el servidor.');
                return;
            }

            if (data.error) {
                showError(data.error);
                return;
            }

            const info = data.info;
            infoBox.classList.remove('error');
            infoBox.innerHTML = `
                ☀️ Provincia: <b>${provincia}</b><br>
                📅 Fecha: ${info.date}<br>
                🌤️ Radiación máxima: ${info.max} W/m²<br>
                🌅 Radiación promedio: ${info.avg} W/m²
            `;

            if (chart) chart.destroy();

            chart = new Chart(ctx, {
                type: 'line',
                data: {
                    labels: data.hours,
                    datasets: [{
                        label: 'Radiación Solar (W/m²)',
                        data: data.values,
                        borderColor: '#1b4d89',
                        backgroundColor: 'rgba(27, 77, 137, 0.2)',
                        fill: true,
                        tension: 0.3
                    }]
                },
                options: {
                    responsive: true,
                    plugins: {
                        zoom: {
                            pan: { enabled: true, mode: 'x', modifierKey: 'ctrl' },
                            zoom: { wheel: { enabled: true }, pinch: { enabled: true }, mode: 'x' }
                        }
                    },
                    scales: {
                        y: { beginAtZero: true },
                        x: { title: { display: true, text: 'Hora del día' } }
                    }
                }
            });
        }
    </script>
</body>
</html>
"##;

/// Render the dashboard shell with one `<option>` per catalog province, in catalog order.
pub fn render_index() -> String {
    let options: String = catalog::names()
        .map(|name| {
            let name = escape_html(name);
            format!(r#"<option value="{name}">{name}</option>"#)
        })
        .collect();
    INDEX_TEMPLATE.replacen(OPTIONS_PLACEHOLDER, &options, 1)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
