// Prompt text for skill extraction

pub const SYSTEM_INSTRUCTION: &str = "You are an expert resume analyzer. Extract skills and create a structured skill tree. Always return valid JSON only.";

pub fn skill_extraction_prompt(resume_text: &str) -> String {
    format!(
        r#"Analyze the following resume and extract all skills, organizing them into a hierarchical skill tree structure.

Resume:
{}

Please identify:
1. Core technical skills (programming languages, frameworks, tools)
2. Soft skills (communication, leadership, etc.)
3. Domain expertise (AI/ML, web development, etc.)
4. Certifications and qualifications
5. Years of experience or proficiency levels where mentioned

Return a JSON structure with this format:
{{
    "skills": {{
        "technical": {{
            "programming_languages": ["skill1", "skill2"],
            "frameworks": ["skill1", "skill2"],
            "tools": ["skill1", "skill2"],
            "databases": ["skill1", "skill2"],
            "cloud_platforms": ["skill1", "skill2"]
        }},
        "soft_skills": ["skill1", "skill2"],
        "domains": ["domain1", "domain2"],
        "certifications": ["cert1", "cert2"]
    }},
    "experience_levels": {{
        "skill_name": "beginner|intermediate|advanced|expert"
    }},
    "skill_relationships": [
        {{"parent": "parent_skill", "child": "child_skill", "type": "prerequisite|related|specialization"}}
    ]
}}

Only return valid JSON, no additional text."#,
        resume_text
    )
}
