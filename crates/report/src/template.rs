pub(crate) const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ heading }}</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #0C0A1D; color: #F8F6FF; padding: 20px; }
        a { color: inherit; }
        .container { max-width: 1200px; margin: 0 auto; border: 1px solid #9CA3AF; border-radius: 15px; overflow: hidden; }
        .header { padding: 30px; text-align: center; border-bottom: 1px solid #9CA3AF; }
        .header h1 { font-size: 2.2em; font-weight: 300; margin-bottom: 0.5rem; }
        .content { padding: 30px; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; padding-bottom: 25px; margin-bottom: 30px; border-bottom: 1px solid #9CA3AF; text-align: center; }
        .summary-card h3 { color: #9CA3AF; font-size: 14px; font-weight: 500; }
        .summary-card .value { font-size: 32px; font-weight: 600; }
        .alert-count .value { color: #ef4444; }
        .proposal-count .value { color: #fbbf24; }
        .member-count .value { color: #22c55e; }
        .section-title { font-size: 1.5rem; font-weight: 500; margin-bottom: 20px; }
        .proposal-card { border: 1px solid #9CA3AF; border-radius: 10px; padding: 20px; margin-bottom: 20px; }
        .proposal-header { display: flex; justify-content: space-between; gap: 10px; flex-wrap: wrap; }
        .proposal-title { font-weight: 600; font-size: 1.1rem; }
        .proposal-badge, .days-left-badge { display: inline-block; padding: 4px 10px; border-radius: 12px; font-size: 12px; background: rgba(34, 197, 94, 0.2); color: #22c55e; }
        .proposal-badge.old { background: rgba(239, 68, 68, 0.2); color: #ef4444; }
        .days-left-badge.urgent { background: rgba(239, 68, 68, 0.2); color: #ef4444; }
        .days-left-badge.soon { background: rgba(251, 191, 36, 0.2); color: #fbbf24; }
        .proposal-stats { display: flex; gap: 30px; margin-top: 12px; color: #9CA3AF; font-size: 14px; }
        .vote-count.all-voted { color: #22c55e; }
        .vote-count.most-voted { color: #fbbf24; }
        .vote-count.few-voted { color: #ef4444; }
        .alert-box { margin-top: 15px; padding: 20px; border: 1px solid #ef4444; border-left-width: 4px; border-radius: 8px; background: rgba(239, 68, 68, 0.1); }
        .alert-title { color: #ef4444; font-weight: 600; margin-bottom: 10px; }
        .non-voters { margin-top: 15px; }
        .non-voters-title { color: #9CA3AF; font-size: 14px; margin-bottom: 6px; }
        .wallet-address { font-family: 'Courier New', monospace; font-size: 13px; display: inline-flex; align-items: center; gap: 10px; margin: 4px 0; padding: 6px 12px; border: 1px solid #9CA3AF; border-radius: 6px; }
        .copy-btn { cursor: pointer; font-size: 11px; padding: 2px 10px; border-radius: 12px; border: 1px solid #9CA3AF; background: transparent; color: #9CA3AF; }
        .copy-btn.copied { color: #22c55e; border-color: #22c55e; }
        .snapshot-link { display: inline-block; margin-top: 1rem; text-decoration: none; color: #fbbf24; }
        .no-alerts { text-align: center; padding: 30px; color: #22c55e; font-size: 1.1rem; }
        .diagnostics { margin-top: 20px; color: #fbbf24; font-size: 14px; }
        .footer { padding: 20px 30px; border-top: 1px solid #9CA3AF; color: #9CA3AF; font-size: 13px; display: flex; justify-content: space-between; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🗳️ {{ heading }}</h1>
            <p><a href="{{ space_url }}" target="_blank">Tracking voting activity for {{ space }}</a></p>
            <p>Last updated: {{ generated_at }}</p>
        </div>
        <div class="content">
            <div class="summary">
                <div class="summary-card alert-count">
                    <h3>Active Alerts</h3>
                    <div class="value">{{ alerts_raised }}</div>
                </div>
                <div class="summary-card proposal-count">
                    <h3>Active Proposals</h3>
                    <div class="value">{{ proposals | length }}</div>
                </div>
                <div class="summary-card member-count">
                    <h3>Council Members</h3>
                    <div class="value">{{ council_size }}</div>
                </div>
            </div>
{% if proposals %}
            <div class="proposals-section">
                <h2 class="section-title">Active Alerts</h2>
{% for p in proposals %}
                <div class="proposal-card" id="proposal-{{ p.id }}">
                    <div class="proposal-header">
                        <div class="proposal-title">{{ p.title }}</div>
                        <div>
                            <span class="proposal-badge {{ p.age_class }}">{{ p.age_days }} days old</span>
                            <span class="days-left-badge {{ p.days_left_class }}">{{ p.days_left_text }}</span>
                        </div>
                    </div>
                    <div class="proposal-stats">
                        <div class="stat"><strong>Total Votes:</strong> {{ p.total_votes }}</div>
                        <div class="stat"><strong>Council Votes:</strong> <span class="vote-count {{ p.vote_class }}">{{ p.council_votes }}/{{ council_size }}</span></div>
                    </div>
{% if p.alert %}
                    <div class="alert-box">
                        <div class="alert-title">⚠️ {{ p.non_voters | length }} Council Member(s) Haven't Voted (Proposal is {{ p.age_days }} days old)</div>
{% for wallet in p.non_voters %}
                        <div class="wallet-address"><span class="wallet-text">{{ wallet }}</span><button class="copy-btn" data-wallet="{{ wallet }}">Copy</button></div>
{% endfor %}
                    </div>
{% elif p.non_voters %}
                    <div class="non-voters">
                        <div class="non-voters-title">Council Members Who Haven't Voted Yet ({{ p.non_voters | length }}):</div>
{% for wallet in p.non_voters %}
                        <div class="wallet-address"><span class="wallet-text">{{ wallet }}</span><button class="copy-btn" data-wallet="{{ wallet }}">Copy</button></div>
{% endfor %}
                    </div>
{% endif %}
                    <a href="{{ p.link }}" class="snapshot-link" target="_blank">View on Snapshot →</a>
                </div>
{% endfor %}
            </div>
{% else %}
            <div class="no-alerts">{% if playful %}🎉 Woohoo! Nothing to see here. Everyone's chilling! 😎{% else %}All clear! No recent proposals requiring attention.{% endif %}</div>
{% endif %}
{% if proposals and alerts_raised == 0 %}
            <div class="no-alerts">{% if playful %}🎊 Amazing! The council is on fire! Everyone voted! 🔥{% else %}✅ Excellent! All council members are up to date with their votes.{% endif %}</div>
{% endif %}
{% if diagnostics %}
            <div class="diagnostics">
                <strong>Some proposals could not be checked:</strong>
                <ul>
{% for d in diagnostics %}
                    <li>{{ d.proposal_title }}: {{ d.error }}</li>
{% endfor %}
                </ul>
            </div>
{% endif %}
        </div>
        <div class="footer">
            <a href="{{ space_url }}" target="_blank">Monitoring Snapshot votes for {{ space }}</a>
            <span class="version">v{{ version }}</span>
        </div>
    </div>
    <script>
        document.querySelectorAll('.copy-btn').forEach(function (button) {
            button.addEventListener('click', function () {
                navigator.clipboard.writeText(button.dataset.wallet).then(function () {
                    button.textContent = 'Copied!';
                    button.classList.add('copied');
                    setTimeout(function () {
                        button.textContent = 'Copy';
                        button.classList.remove('copied');
                    }, 2000);
                });
            });
        });
    </script>
</body>
</html>
"#;
