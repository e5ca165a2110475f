pub fn store_type_prompt(query: &str) -> String {
    format!(
        r#"你是一個專業的餐廳推薦助手。請根據以下需求，分析並推薦合適的餐廳類型：

查詢需求: {query}

請以JSON格式回答，格式如下：
{{
    "store_type": "餐廳類型（例如：日式料理、咖啡廳等）",
    "analysis": "詳細分析這類型餐廳為什麼適合該需求"
}}

請確保回應是有效的JSON格式。"#
    )
}

pub fn matcher_prompt(query: &str) -> String {
    format!(
        r#"你是一位專業的餐飲分析師。請分析以下用戶搜索關鍵詞，並提取與餐廳和食物相關的關鍵信息：

用戶搜索：{query}

請提取以下信息：
1. 菜系或食物類型（例如：中式、日式、快餐、素食等）
2. 特定食物名稱或菜品（例如：牛排、壽司、漢堡等）
3. 價格範圍或預算考量（例如：平價、高檔等）
4. 特殊飲食需求（例如：素食、無麩質、低卡路里等）
5. 用戶可能想要的用餐體驗或氛圍（例如：安靜的、適合家庭的、浪漫的等）
6. 最佳搜索關鍵詞（為Google Maps搜索優化的2-3個關鍵詞）

請使用以下JSON格式回答，確保它是有效的JSON：
{{
    "cuisine_type": "菜系或食物類型",
    "specific_foods": ["食物1", "食物2"],
    "price_range": "價格範圍",
    "dietary_requirements": ["需求1", "需求2"],
    "dining_experience": ["體驗1", "體驗2"],
    "search_keywords": ["關鍵詞1", "關鍵詞2", "關鍵詞3"]
}}

如果用戶的輸入中沒有提到某個類別的信息，請將該字段設置為空列表或空字符串。"#
    )
}
