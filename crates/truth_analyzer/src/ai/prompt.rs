use super::client::ChatPrompt;

const SYSTEM_PROMPT: &str = "Ты эксперт по анализу достоверности текстов. Отвечай только в формате JSON.";

/// 构建可信度分析提示词，原文按原样嵌入
pub fn build_analysis_prompt(text: &str) -> ChatPrompt {
    let user = format!(
        r#"Проанализируй следующий текст и предоставь детальную оценку:

Текст: "{text}"

Верни JSON со следующими полями:
1. confidence (0-100): уровень достоверности информации
2. verdict: "verified" (высокая достоверность), "unverified" (средняя), или "warning" (низкая)
3. sentiment: "positive", "neutral", или "negative"
4. sentimentScore (-100 до 100): числовая оценка тональности
5. aiScore (0-100): общая AI-оценка качества текста
6. aiInsights: массив из 3-5 ключевых наблюдений на русском языке
7. sources: массив из 2-4 рекомендуемых источников для проверки

Анализируй:
- Фактическую точность
- Эмоциональную окраску
- Структуру и логику
- Возможные предвзятости

Верни только JSON, без дополнительного текста."#
    );

    ChatPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "Земля плоская, а \"луна\" {сделана} из сыра";
        let prompt = build_analysis_prompt(text);
        assert!(prompt.user.contains(&format!("Текст: \"{}\"", text)));
        assert_eq!(prompt.system, SYSTEM_PROMPT);
    }

    #[test]
    fn test_prompt_lists_all_fields() {
        let prompt = build_analysis_prompt("abc");
        for field in [
            "confidence",
            "verdict",
            "sentiment",
            "sentimentScore",
            "aiScore",
            "aiInsights",
            "sources",
        ] {
            assert!(prompt.user.contains(field), "缺少字段 {}", field);
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_analysis_prompt("x"), build_analysis_prompt("x"));
    }
}
