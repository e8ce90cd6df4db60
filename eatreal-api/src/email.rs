use eatreal_model::{answer::AnswerSet, profile::humanize, question::ids};
use itertools::Itertools;

use crate::generator::PlanContent;

pub const PLAN_SUBJECT: &str = "Your Personalized Nutrition Plan";
pub const PURCHASE_SUBJECT: &str = "Your copy of The Food Bible";

const STYLE: &str = "
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5; }
.container { max-width: 600px; margin: 0 auto; background-color: #ffffff; }
.header { background-color: #45B26B; padding: 20px; text-align: center; }
.header h1 { color: white; margin: 0; font-size: 24px; font-weight: 600; }
.content { padding: 40px 20px; }
.section { margin-bottom: 30px; }
.section-title { color: #45B26B; font-size: 20px; font-weight: 600; border-bottom: 2px solid #45B26B; padding-bottom: 5px; }
.intro-section { background: #f8f9fa; border-left: 4px solid #45B26B; padding: 20px; margin: 20px 0; border-radius: 8px; color: #666; }
.highlight { color: #45B26B; font-weight: 600; }
.meal-day { background: white; border-radius: 12px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 25px; margin-bottom: 30px; }
.macros-box { background: #f0f7f1; border-radius: 8px; padding: 15px; margin-bottom: 20px; }
.meal-table { width: 100%; border-collapse: collapse; }
.meal-table th { background: #45B26B; color: white; padding: 10px; text-align: left; }
.meal-table td { padding: 10px; border-bottom: 1px solid #eee; }
.grocery-list { background: white; border: 1px solid #ddd; border-radius: 8px; padding: 20px; }
.prep-tips { background: #fff5e6; border-radius: 8px; padding: 20px; }
.button { display: inline-block; background: #45B26B; color: white; padding: 12px 24px; border-radius: 6px; text-decoration: none; }
";

pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

pub fn format_daily_targets(text: &str) -> String {
    if !text.contains("CALORIES:") {
        return "<p>Error: Invalid daily targets format</p>".to_owned();
    }
    let value = |key: &str| {
        text.lines()
            .find_map(|line| line.split_once(key).map(|(_, v)| escape(v.trim())))
            .unwrap_or_else(|| "N/A".to_owned())
    };
    format!(
        "<div class=\"macros-box\"><table class=\"meal-table\">\
<tr><th>Calories</th><th>Protein</th><th>Carbs</th><th>Fats</th></tr>\
<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></table></div>",
        value("CALORIES:"),
        value("PROTEIN:"),
        value("CARBS:"),
        value("FATS:")
    )
}

/// Groups `DAY n:` headers with the `Meal: details` lines under them.
pub fn format_meal_plan(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p>Error: Empty meal plan</p>".to_owned();
    }
    let mut html = String::from("<div class=\"meal-plan\">");
    let mut in_day = false;
    for line in non_empty_lines(text) {
        if line.starts_with("DAY") {
            if in_day {
                html.push_str("</div>");
            }
            in_day = true;
            html.push_str(&format!("<div class=\"meal-day\"><h3>{}</h3>", escape(line)));
        } else if let Some((meal, details)) = line.split_once(':') {
            html.push_str(&format!(
                "<div class=\"meal-item\"><h4>{}</h4><p>{}</p></div>",
                escape(meal.trim()),
                escape(details.trim())
            ));
        }
    }
    if in_day {
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

/// `CATEGORY:` lines open a list, `- item` lines fill it.
pub fn format_grocery_list(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p>Error: Empty grocery list</p>".to_owned();
    }
    let mut html = String::from("<div class=\"grocery-list\">");
    let mut in_category = false;
    for line in non_empty_lines(text) {
        if line.ends_with(':') {
            if in_category {
                html.push_str("</ul>");
            }
            in_category = true;
            html.push_str(&format!("<h3>{}</h3><ul>", escape(line)));
        } else if let Some(item) = line.strip_prefix('-') {
            html.push_str(&format!("<li>{}</li>", escape(item.trim())));
        }
    }
    if in_category {
        html.push_str("</ul>");
    }
    html.push_str("</div>");
    html
}

/// Keeps numbered or bulleted lines, without their markers.
pub fn format_prep_tips(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p>Error: Empty prep tips</p>".to_owned();
    }
    let items = non_empty_lines(text)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit() || c == '-'))
        .map(|line| {
            let tip = line.trim_start_matches(|c: char| c.is_ascii_digit() || ".-) ".contains(c));
            format!("<li>{}</li>", escape(tip))
        })
        .join("");
    format!("<div class=\"prep-tips\"><ol>{}</ol></div>", items)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<style>{}</style>
</head>
<body>
<div class=\"container\">
<div class=\"header\"><h1>{}</h1></div>
<div class=\"content\">{}</div>
</div>
</body>
</html>
",
        STYLE,
        escape(title),
        body
    )
}

fn profile_value(profile: &AnswerSet, key: &str) -> String {
    profile
        .get(key)
        .map(|v| escape(&humanize(&v.to_string())))
        .unwrap_or_else(|| "not specified".to_owned())
}

fn section(title: &str, content: String) -> String {
    format!(
        "<div class=\"section\"><h2 class=\"section-title\">{}</h2>{}</div>",
        title, content
    )
}

pub fn render_plan(content: &PlanContent, profile: &AnswerSet) -> String {
    let highlight = |key: &str| {
        format!(
            "<span class=\"highlight\">{}</span>",
            profile_value(profile, key)
        )
    };
    let intro = format!(
        "<div class=\"intro-section\">\
<p>Welcome to your personalized nutrition journey! Based on your profile, we've created a meal plan that:</p>\
<p>Supports your {} goal from {}kg to {}kg</p>\
<p>Matches your {} activity level</p>\
<p>Follows your {} dietary preference</p>\
<p>Fits within your {} cooking time preference</p>\
<p>Includes meal prep options: {}</p>\
</div>",
        highlight(ids::GOAL),
        profile_value(profile, ids::CURRENT_WEIGHT),
        profile_value(profile, ids::TARGET_WEIGHT),
        highlight(ids::ACTIVITY),
        highlight(ids::DIET_PREFERENCE),
        highlight(ids::COOKING_TIME),
        profile_value(profile, ids::MEAL_PREP),
    );

    let body = [
        intro,
        section("Daily Targets", format_daily_targets(&content.daily_targets)),
        section("Your 7-Day Meal Plan", format_meal_plan(&content.meal_plan)),
        section("Grocery List", format_grocery_list(&content.grocery_list)),
        section("Meal Prep Tips", format_prep_tips(&content.prep_tips)),
    ]
    .join("\n");
    page(PLAN_SUBJECT, &body)
}

pub fn render_purchase(download_url: &str) -> String {
    let body = format!(
        "<div class=\"section\">\
<p>Thank you for buying The Food Bible!</p>\
<p>Your copy is ready to download:</p>\
<p><a class=\"button\" href=\"{}\">Download the e-book</a></p>\
</div>",
        escape(download_url)
    );
    page("Thank you for your purchase", &body)
}
